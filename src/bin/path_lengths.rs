use clap::Parser;
use dcnet_rs::experiment::{BuiltTopology, TopologySpec};
use dcnet_rs::path::{as_fractions, path_length_distribution};
use std::collections::BTreeSet;
use std::process::ExitCode;

/// Same equipment on both sides: a 14-port fat-tree has 686 servers and 245 switches.
#[derive(Debug, Parser)]
#[command(
    name = "path-lengths",
    about = "Compare server-to-server shortest path lengths of a fat-tree and a jellyfish"
)]
struct Args {
    /// Fat-tree ports per switch
    #[arg(long, default_value_t = 14)]
    k: usize,

    /// Jellyfish server count
    #[arg(long, default_value_t = 686)]
    servers: usize,

    /// Jellyfish switch count
    #[arg(long, default_value_t = 245)]
    switches: usize,

    /// Jellyfish ports per switch
    #[arg(long, default_value_t = 14)]
    ports: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,
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
            eprintln!("path-lengths: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let fat_tree = TopologySpec::FatTree { k: args.k }.build()?;
    let jellyfish = TopologySpec::Jellyfish {
        num_servers: args.servers,
        num_switches: args.switches,
        num_ports: args.ports,
        seed: args.seed,
        max_attempts: None,
    }
    .build()?;

    let ft = fractions(&fat_tree)?;
    let jf = fractions(&jellyfish)?;

    let lengths: BTreeSet<usize> = ft.keys().chain(jf.keys()).copied().collect();
    for len in lengths {
        println!(
            "path_len {len} fat_tree={:.4} jellyfish={:.4}",
            ft.get(&len).copied().unwrap_or(0.0),
            jf.get(&len).copied().unwrap_or(0.0)
        );
    }
    Ok(())
}

fn fractions(
    built: &BuiltTopology,
) -> Result<std::collections::BTreeMap<usize, f64>, Box<dyn std::error::Error>> {
    let adj = built.topology().adjacency();
    let dist = path_length_distribution(&adj, &built.servers())?;
    Ok(as_fractions(&dist))
}
