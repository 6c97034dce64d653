use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueHint};
use gpx_analyzer::{AnalyzerConfig, AnalyzerError, pipeline};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Distance and elevation statistics for a GPX track", long_about = None)]
struct Cli {
    /// GPX file to analyze (prompted for when omitted)
    #[arg(value_hint = ValueHint::FilePath)]
    path: Option<PathBuf>,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn prompt_for_path() -> io::Result<PathBuf> {
    let mut stdout = io::stdout();
    write!(stdout, "Enter path to GPX file: ")?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(PathBuf::from(line.trim()))
}

fn run(cli: Cli) -> Result<(), AnalyzerError> {
    let config = AnalyzerConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");

    let path = match cli.path {
        Some(path) => path,
        None => prompt_for_path()?,
    };

    let mut sinks = pipeline::default_sinks(&config);
    let artifacts = pipeline::run(&path, &config, &mut sinks)?;
    for artifact in artifacts {
        println!("{artifact}");
    }

    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Analysis failed: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
