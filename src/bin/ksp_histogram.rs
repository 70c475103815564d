use clap::Parser;
use dcnet_rs::experiment::{ExperimentSpec, HistogramReport, TopologySpec};
use dcnet_rs::path::{
    ParallelPathComputer, derangement_pairs, link_usage_histogram, random_derangement,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "ksp-histogram",
    about = "Rank links by how many k-shortest paths of a random permutation workload cross them"
)]
struct Args {
    /// Experiment description (JSON); flags below override its fields
    #[arg(long)]
    spec: Option<PathBuf>,

    /// Jellyfish server count
    #[arg(long)]
    servers: Option<usize>,

    /// Jellyfish switch count
    #[arg(long)]
    switches: Option<usize>,

    /// Jellyfish ports per switch
    #[arg(long)]
    ports: Option<usize>,

    /// Seed of the switch interconnect
    #[arg(long)]
    seed: Option<u64>,

    /// Paths per server pair
    #[arg(long)]
    k_paths: Option<usize>,

    /// Worker threads
    #[arg(long)]
    parallelism: Option<usize>,

    /// Seed of the permutation workload
    #[arg(long)]
    traffic_seed: Option<u64>,

    /// Output histogram JSON
    #[arg(long)]
    out: Option<PathBuf>,
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
            eprintln!("ksp-histogram: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_spec(args: &Args) -> Result<ExperimentSpec, Box<dyn std::error::Error>> {
    let mut spec = match &args.spec {
        Some(path) => serde_json::from_str::<ExperimentSpec>(&fs::read_to_string(path)?)?,
        None => ExperimentSpec {
            topology: TopologySpec::Jellyfish {
                num_servers: 686,
                num_switches: 245,
                num_ports: 14,
                seed: 45,
                max_attempts: None,
            },
            k_paths: 8,
            parallelism: 4,
            traffic_seed: 0,
        },
    };

    if let TopologySpec::Jellyfish {
        num_servers,
        num_switches,
        num_ports,
        seed,
        ..
    } = &mut spec.topology
    {
        if let Some(v) = args.servers {
            *num_servers = v;
        }
        if let Some(v) = args.switches {
            *num_switches = v;
        }
        if let Some(v) = args.ports {
            *num_ports = v;
        }
        if let Some(v) = args.seed {
            *seed = v;
        }
    }
    if let Some(v) = args.k_paths {
        spec.k_paths = v;
    }
    if let Some(v) = args.parallelism {
        spec.parallelism = v;
    }
    if let Some(v) = args.traffic_seed {
        spec.traffic_seed = v;
    }
    Ok(spec)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let spec = load_spec(args)?;
    let built = spec.topology.build()?;
    let adj = built.topology().adjacency();
    let servers = built.servers();

    let mut rng = StdRng::seed_from_u64(spec.traffic_seed);
    let perm = random_derangement(servers.len(), &mut rng)?;
    let pairs = derangement_pairs(&servers, &perm);

    let computer = ParallelPathComputer::new(spec.k_paths, spec.parallelism);
    let all_paths = computer.compute_all(&adj, &pairs)?;
    let links = link_usage_histogram(&all_paths, &adj.links())?;

    for (rank, usage) in links.iter().enumerate() {
        println!("link_rank {rank} {}", usage.count);
    }

    if let Some(path) = &args.out {
        let report = HistogramReport {
            k_paths: spec.k_paths,
            pairs: pairs.len(),
            links,
        };
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
    }
    Ok(())
}
