//! Analyze a running-config file and print every table.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example analyze -- --file router.cfg
//! cargo run --example analyze -- --file router.cfg --vendor huawei --csv
//! ```

use std::env;
use std::fs;
use std::path::PathBuf;

use cfglens::export::{
    Style, Table, bgp_neighbor_table, bgp_network_table, interface_table, l2vpn_table, vlan_table,
};
use cfglens::{AnalysisEngine, VendorKind, decode_config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let Some(path) = args.file else {
        eprintln!("Error: --file is required");
        Args::print_help();
        std::process::exit(1);
    };

    let bytes = fs::read(&path)?;
    let text = decode_config(&bytes);

    let mut builder = AnalysisEngine::builder();
    if let Some(vendor) = args.vendor {
        builder = builder.vendor(vendor);
    }
    if let Some(mtu) = args.default_mtu {
        builder = builder.default_mtu(mtu);
    }
    let mut engine = builder.build();

    let vendor = engine.load(&text)?;
    println!("{}: {} lines, vendor {}", path.display(), engine.line_count()?, vendor);
    if !vendor.is_known() {
        println!("No vendor matched. Retry with --vendor <cisco|huawei|mikrotik>.");
        return Ok(());
    }

    let style = if args.csv { Style::Csv } else { Style::Display };

    print_table("Interfaces", &interface_table(&engine.interfaces()?, style), args.csv);

    let bgp = engine.bgp()?;
    println!(
        "\nBGP: AS {}, router-id {}",
        bgp.local_as.as_deref().unwrap_or("-"),
        bgp.router_id.as_deref().unwrap_or("-")
    );
    print_table("BGP neighbors", &bgp_neighbor_table(&bgp.neighbors, style), args.csv);
    print_table("BGP networks", &bgp_network_table(&bgp.networks), args.csv);

    print_table("L2VPN", &l2vpn_table(&engine.l2vpn()?, style), args.csv);
    print_table("VLAN contexts", &vlan_table(&engine.vlan_contexts()?, style), args.csv);

    if args.json {
        println!("\n{}", bgp.to_json()?);
    }

    Ok(())
}

fn print_table(title: &str, table: &Table, csv: bool) {
    println!("\n{} ({})", title, table.len());
    println!("{}", "-".repeat(50));
    if table.is_empty() {
        println!("(none)");
    } else if csv {
        print!("{}", table.render_csv());
    } else {
        print!("{}", table);
    }
}

/// Simple argument parser (avoiding external dependencies)
struct Args {
    file: Option<PathBuf>,
    vendor: Option<VendorKind>,
    default_mtu: Option<u32>,
    csv: bool,
    json: bool,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut file = None;
        let mut vendor = None;
        let mut default_mtu = None;
        let mut csv = false;
        let mut json = false;

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--file" | "-f" => {
                    i += 1;
                    if i < args.len() {
                        file = Some(PathBuf::from(&args[i]));
                    }
                }
                "--vendor" | "-v" => {
                    i += 1;
                    if i < args.len() {
                        match args[i].parse::<VendorKind>() {
                            Ok(kind) => vendor = Some(kind),
                            Err(e) => eprintln!("{}, detecting instead", e),
                        }
                    }
                }
                "--mtu" => {
                    i += 1;
                    if i < args.len() {
                        default_mtu = args[i].parse().ok();
                    }
                }
                "--csv" => csv = true,
                "--json" => json = true,
                "--help" => {
                    Self::print_help();
                    std::process::exit(0);
                }
                _ => {
                    eprintln!("Unknown argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Self {
            file,
            vendor,
            default_mtu,
            csv,
            json,
        }
    }

    fn print_help() {
        println!(
            r#"cfglens analyze example

USAGE:
    cargo run --example analyze -- --file <PATH> [OPTIONS]

OPTIONS:
    -f, --file <PATH>        Running-config file to analyze
    -v, --vendor <VENDOR>    Skip detection: cisco, huawei or mikrotik
    --mtu <BYTES>            MTU for VLANs without one [default: 1500]
    --csv                    Print tables as CSV
    --json                   Also print the BGP summary as JSON
    --help                   Print this help message
"#
        );
    }
}
