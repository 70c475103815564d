use clap::Parser;
use dcnet_rs::experiment::TopologyExport;
use dcnet_rs::routing::RoutingTable;
use dcnet_rs::topo::{FatTreeOpts, build_fat_tree};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "fat-tree", about = "Build a k-port fat-tree and its two-level routing table")]
struct Args {
    /// Ports per switch (even, 2..=254)
    #[arg(long, default_value_t = 4)]
    k: usize,

    /// Write nodes and edges as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print every routing rule
    #[arg(long)]
    routes: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fat-tree: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let ft = build_fat_tree(&FatTreeOpts::with_k(args.k))?;
    let table = RoutingTable::for_fat_tree(&ft)?;

    println!(
        "fat_tree k={} core={} agg={} edge={} servers={} links={}",
        ft.k,
        ft.num_core(),
        ft.num_agg(),
        ft.num_edge(),
        ft.num_servers(),
        ft.topology.edges().count()
    );

    if args.routes {
        for switch in table.switches() {
            for rule in table.prefix_rules(switch) {
                println!(
                    "prefix {switch} {} -> {} {} prio={}",
                    rule.network, rule.next_hop.id, rule.next_hop.ip, rule.next_hop.priority
                );
            }
            for rule in table.suffix_rules(switch) {
                println!(
                    "suffix {switch} 0.0.0.{} -> {} {} prio={}",
                    rule.host_suffix, rule.next_hop.id, rule.next_hop.ip, rule.next_hop.priority
                );
            }
        }
    }

    if let Some(path) = &args.json {
        let export = TopologyExport::from(&ft.topology);
        fs::write(path, serde_json::to_string_pretty(&export)?)?;
    }
    Ok(())
}
