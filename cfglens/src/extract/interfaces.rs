//! Interface pass for block-structured dialects (Cisco IOS, Huawei VRP).
//!
//! A single interface register is opened by every `interface <name>` line.
//! Lines up to the next declaration are tested against the dialect's field
//! patterns and written into the open record (last write wins per field);
//! anything else is ignored. The next declaration, or the end of the
//! buffer, flushes the record.

use std::sync::LazyLock;

use regex::Regex;

use super::tokens::{is_numeric, rest_after, split};
use crate::buffer::LineBuffer;
use crate::records::{InterfaceRecord, InterfaceStatus};

static VLAN_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"vlan\s+(\d+)").unwrap());

/// How a dialect writes the access VLAN of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AccessVlanRule {
    /// `switchport access vlan N`
    SwitchportAccess,
    /// Any line with `vlan N` in it (`port default vlan N`, `pvid vlan N`).
    AnyVlanToken,
}

/// Per-dialect keywords of the interface pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InterfaceSyntax {
    /// Line that administratively enables an interface.
    pub enable: &'static str,
    pub access_vlan: AccessVlanRule,
}

/// Run the interface pass over `lines`.
pub(crate) fn block_interfaces(lines: &LineBuffer, syntax: &InterfaceSyntax) -> Vec<InterfaceRecord> {
    let mut records = Vec::new();
    let mut current: Option<InterfaceRecord> = None;

    for line in lines.iter() {
        if let Some(name) = rest_after(line, "interface ") {
            if let Some(done) = current.replace(InterfaceRecord::new(name)) {
                records.push(done);
            }
            continue;
        }

        if let Some(record) = current.as_mut() {
            apply_field(record, line, syntax);
        }
    }

    records.extend(current);
    records
}

fn apply_field(record: &mut InterfaceRecord, line: &str, syntax: &InterfaceSyntax) {
    if line.starts_with("ip address ") {
        let parts = split(line);
        if let Some(addr) = parts.get(2) {
            record.ip_address = Some(addr.to_string());
            if let Some(mask) = parts.get(3) {
                record.subnet_mask = Some(mask.to_string());
            }
        }
    } else if let Some(description) = rest_after(line, "description ") {
        record.description = Some(description.to_string());
    } else if line == "shutdown" {
        record.status = InterfaceStatus::Shutdown;
    } else if line == syntax.enable {
        record.status = InterfaceStatus::Up;
    } else if let Some(vlan) = access_vlan(line, syntax.access_vlan) {
        record.vlan = Some(vlan);
    }
}

fn access_vlan(line: &str, rule: AccessVlanRule) -> Option<u32> {
    match rule {
        AccessVlanRule::SwitchportAccess => {
            if !line.starts_with("switchport access vlan ") {
                return None;
            }
            split(line)
                .last()
                .filter(|t| is_numeric(t))
                .and_then(|t| t.parse().ok())
        }
        AccessVlanRule::AnyVlanToken => {
            let lower = line.to_lowercase();
            if !lower.contains("vlan") {
                return None;
            }
            VLAN_TOKEN
                .captures(&lower)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse().ok())
        }
    }
}
