use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use meshgen::config::Overrides;
use meshgen::{config_loader, orchestrator};

/// Generate a random service mesh topology as Kubernetes manifests
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional YAML configuration file; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write manifests to this file instead of standard output
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the random generator (defaults to the current time)
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Number of services to generate
    #[arg(long, alias = "numServices", allow_negative_numbers = true)]
    num_services: Option<i64>,

    /// Chance for an edge between two services to exist (100 == sure)
    #[arg(long, alias = "percentEdge", allow_negative_numbers = true)]
    percent_edge: Option<i64>,

    /// Namespace to deploy to
    #[arg(long)]
    namespace: Option<String>,

    /// Mesh to deploy to
    #[arg(long)]
    mesh: Option<String>,

    /// Image run by every service
    #[arg(long)]
    image: Option<String>,

    /// Start a job that generates synthetic load to the first service
    /// (`--with-generator=false` turns off a config file's setting)
    #[arg(
        long,
        alias = "withGenerator",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    with_generator: Option<bool>,

    /// Reserved for failure injection; currently has no effect
    #[arg(
        long,
        alias = "withFailure",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    with_failure: Option<bool>,

    /// Also write the topology as a Graphviz digraph to this file
    #[arg(long)]
    dot: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            num_services: self.num_services,
            percent_edge: self.percent_edge,
            namespace: self.namespace.clone(),
            mesh: self.mesh.clone(),
            image: self.image.clone(),
            with_generator: self.with_generator,
            with_failure: self.with_failure,
            dot_output: self.dot.clone(),
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Logs go to stderr so stdout carries only the manifest stream
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut config = config_loader::load_or_default(args.config.as_deref())?;
    config.apply_overrides(&args.overrides());
    for warning in config.warnings() {
        warn!("{}", warning);
    }
    let settings = config.resolve(|| chrono::Utc::now().timestamp());

    info!("Using seed {}", settings.generator.seed);

    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .wrap_err_with(|| format!("Failed to create output file '{}'", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let graph = orchestrator::run(&settings, &mut sink)?;

    info!(
        "Wrote manifests for {} services and {} edges",
        graph.len(),
        graph.edge_count()
    );
    Ok(())
}
