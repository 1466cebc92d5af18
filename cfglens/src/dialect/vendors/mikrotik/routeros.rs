//! RouterOS export reader.
//!
//! RouterOS has no nested blocks. An export is a flat list of commands,
//! each addressed to a menu path, written in one of two forms:
//!
//! ```text
//! /ip address add address=10.0.0.1/24 interface=ether1     # one-shot
//!
//! /ip address                                               # section header
//! add address=10.0.0.1/24 interface=ether1
//! add address=10.1.0.1/24 interface=vlan100
//! ```
//!
//! Long commands are wrapped with a trailing `\` and continued on the next
//! line. [`commands`] turns either form into the same [`Command`] list.

use indexmap::IndexMap;

use crate::buffer::LineBuffer;

/// Words that end a menu path and start a command.
const VERBS: &[&str] = &[
    "add", "set", "remove", "print", "enable", "disable", "edit", "unset", "move", "comment",
];

/// One RouterOS command resolved against its menu path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Command {
    /// Menu path, e.g. `/ip address`.
    pub section: String,
    /// Command verb (`add`, `set`, ...), if any.
    pub verb: Option<String>,
    /// `key=value` parameters in written order.
    pub params: IndexMap<String, String>,
}

impl Command {
    /// Get a parameter value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// True if the command is addressed to exactly `section`.
    pub fn is(&self, section: &str) -> bool {
        self.section == section
    }

    /// True if the command's path starts with `prefix`.
    pub fn under(&self, prefix: &str) -> bool {
        self.section.starts_with(prefix)
    }

    /// True for commands that define configuration: `add`, `set`, or bare
    /// parameters.
    pub fn is_definition(&self) -> bool {
        matches!(self.verb.as_deref(), None | Some("add") | Some("set"))
    }
}

/// Read every defining command in the buffer, in document order.
pub(crate) fn commands(lines: &LineBuffer) -> Vec<Command> {
    let mut out = Vec::new();
    let mut section: Option<String> = None;

    for line in logical_lines(lines) {
        if line.starts_with('#') {
            continue;
        }

        let tokens = tokenize(&line);
        if tokens.is_empty() {
            continue;
        }

        if tokens[0].starts_with('/') {
            let path_len = tokens
                .iter()
                .position(|t| is_verb(t) || t.contains('='))
                .unwrap_or(tokens.len());
            let path = tokens[..path_len].join(" ");

            if path_len == tokens.len() {
                section = Some(path);
            } else {
                out.push(build(path, &tokens[path_len..]));
            }
        } else if let Some(path) = &section {
            out.push(build(path.clone(), &tokens));
        } else {
            log::trace!("routeros: command outside any section: {}", line);
        }
    }

    out.retain(|cmd| {
        let keep = cmd.is_definition();
        if !keep {
            log::trace!("routeros: skipping {:?} on {}", cmd.verb, cmd.section);
        }
        keep
    });
    out
}

fn is_verb(token: &str) -> bool {
    VERBS.contains(&token)
}

fn build(section: String, tokens: &[String]) -> Command {
    let verb = tokens.first().filter(|t| is_verb(t)).cloned();
    let params = tokens
        .iter()
        .filter_map(|t| t.split_once('='))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    Command {
        section,
        verb,
        params,
    }
}

/// Join `\`-continued lines into single logical lines.
fn logical_lines(lines: &LineBuffer) -> Vec<String> {
    let mut out = Vec::new();
    let mut pending = String::new();

    for line in lines.iter() {
        match line.strip_suffix('\\') {
            Some(head) => {
                pending.push_str(head.trim_end());
                pending.push(' ');
            }
            None => {
                pending.push_str(line);
                out.push(std::mem::take(&mut pending));
            }
        }
    }

    if !pending.trim().is_empty() {
        out.push(pending.trim_end().to_string());
    }
    out
}

/// Split a command line into tokens.
///
/// Double quotes group words (`comment="Link to PE"`) and are removed;
/// `\"` inside quotes is a literal quote. `[ find ... ]` selectors are
/// dropped so their filters are not read as parameters.
fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut bracket_depth = 0usize;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if in_quotes => {
                if let Some(next) = chars.next() {
                    current.push(next);
                }
            }
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => bracket_depth += 1,
            ']' if !in_quotes => {
                bracket_depth = bracket_depth.saturating_sub(1);
                current.clear();
            }
            c if c.is_whitespace() && !in_quotes => {
                if bracket_depth == 0 && !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
                current.clear();
            }
            c => current.push(c),
        }
    }

    if bracket_depth == 0 && !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_shot_command() {
        let lines = LineBuffer::new("/ip address add address=10.0.0.1/24 interface=ether1");
        let cmds = commands(&lines);
        assert_eq!(cmds.len(), 1);
        assert!(cmds[0].is("/ip address"));
        assert_eq!(cmds[0].verb.as_deref(), Some("add"));
        assert_eq!(cmds[0].get("address"), Some("10.0.0.1/24"));
        assert_eq!(cmds[0].get("interface"), Some("ether1"));
    }

    #[test]
    fn test_section_header_form() {
        let lines = LineBuffer::new(
            "/interface vlan\n\
             add interface=ether1 name=vlan100 vlan-id=100\n\
             add interface=ether1 name=vlan200 vlan-id=200\n\
             /ip address\n\
             add address=10.0.0.1/24 interface=vlan100\n",
        );
        let cmds = commands(&lines);
        assert_eq!(cmds.len(), 3);
        assert!(cmds[0].is("/interface vlan"));
        assert_eq!(cmds[1].get("name"), Some("vlan200"));
        assert!(cmds[2].is("/ip address"));
    }

    #[test]
    fn test_one_shot_does_not_change_section() {
        let lines = LineBuffer::new(
            "/interface vlan\n\
             /ip address add address=10.0.0.1/24 interface=ether1\n\
             add name=vlan5 vlan-id=5 interface=ether1\n",
        );
        let cmds = commands(&lines);
        assert!(cmds[1].is("/interface vlan"));
    }

    #[test]
    fn test_set_with_positional_and_find() {
        let lines = LineBuffer::new(
            "/routing bgp instance set default as=65000 router-id=1.1.1.1\n\
             /interface ethernet set [ find default-name=ether1 ] name=wan\n",
        );
        let cmds = commands(&lines);
        assert!(cmds[0].is("/routing bgp instance"));
        assert_eq!(cmds[0].verb.as_deref(), Some("set"));
        assert_eq!(cmds[0].get("as"), Some("65000"));
        assert_eq!(cmds[0].get("router-id"), Some("1.1.1.1"));

        assert!(cmds[1].is("/interface ethernet"));
        assert_eq!(cmds[1].get("default-name"), None);
        assert_eq!(cmds[1].get("name"), Some("wan"));
    }

    #[test]
    fn test_quoted_values() {
        let lines = LineBuffer::new(r#"/interface vlan add comment="Cliente \"A\" - SP" name=vlan10 vlan-id=10"#);
        let cmds = commands(&lines);
        assert_eq!(cmds[0].get("comment"), Some(r#"Cliente "A" - SP"#));
        assert_eq!(cmds[0].get("vlan-id"), Some("10"));
    }

    #[test]
    fn test_line_continuation() {
        let lines = LineBuffer::new(
            "/interface vpls\n\
             add disabled=no l2mtu=1500 mac-address=02:00:00:00:00:01 name=vpls300 \\\n    \
             remote-peer=10.0.0.9 vpls-id=65000:300\n",
        );
        let cmds = commands(&lines);
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].get("name"), Some("vpls300"));
        assert_eq!(cmds[0].get("remote-peer"), Some("10.0.0.9"));
    }

    #[test]
    fn test_non_defining_verbs_skipped() {
        let lines = LineBuffer::new(
            "/ip address
             remove [ find interface=ether9 ]
             print
             add address=10.0.0.1/24 interface=ether1
",
        );
        let cmds = commands(&lines);
        assert_eq!(cmds.len(), 1);
        assert_eq!(cmds[0].get("interface"), Some("ether1"));
    }

    #[test]
    fn test_comments_and_orphans_skipped() {
        let lines = LineBuffer::new("# jan/02/2024 by RouterOS 7.12\nadd name=x\n\n/system identity\nset name=R1\n");
        let cmds = commands(&lines);
        assert_eq!(cmds.len(), 1);
        assert!(cmds[0].is("/system identity"));
        assert!(cmds[0].under("/system"));
    }
}
