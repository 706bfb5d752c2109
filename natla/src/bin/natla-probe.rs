use std::process::ExitCode;

use clap::Parser;
use natla::{select_backend, LoaderConfig, ProbeReport, SystemProbe};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, long_about = None)]
#[command(about = "natla probe - report which native BLAS backends this host can load")]
struct Cli {
    /// Test an explicit backend request (mkl, openblas, accelerate, none)
    #[arg(long)]
    backend: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Log loader progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "natla=debug" } else { "natla=warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> natla::Result<()> {
    let mut config = LoaderConfig::from_env()?;
    if let Some(symbol) = &cli.backend {
        config = config.with_backend(symbol.as_str());
    }

    let probe = SystemProbe::new(&config);
    let report = ProbeReport::collect(&probe);
    if cli.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| natla::Error::Config(e.to_string()))?;
        println!("{json}");
    } else {
        println!("{report}");
    }

    // An explicit request must load exactly that backend
    if let Some(kind) = config.requested()? {
        let selected = select_backend(Some(kind), &probe)?;
        if !cli.json {
            let origin = selected
                .as_ref()
                .map_or("no native library", |backend| backend.origin());
            println!("requested {kind}: {origin}");
        }
    }
    Ok(())
}
