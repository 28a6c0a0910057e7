use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use helmgen::{AppError, Destination, ServiceConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "helmgen")]
#[command(version)]
#[command(about = "Generate Helm chart scaffolds from JSON resource configuration", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Suppress all log output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a chart from a JSON payload file or stdin
    #[clap(visible_alias = "g")]
    Generate {
        /// JSON payload path; omit or pass '-' to read stdin
        input: Option<PathBuf>,
        #[command(flatten)]
        settings: SettingsArgs,
        /// Print the rendered files instead of writing them
        #[arg(long)]
        dry_run: bool,
    },
    /// Serve the generate operation over HTTP
    #[clap(visible_alias = "s")]
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to bind
        #[arg(short, long)]
        port: Option<u16>,
        #[command(flatten)]
        settings: SettingsArgs,
    },
}

#[derive(Args)]
struct SettingsArgs {
    /// Config file (defaults to ./helmgen.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Chart output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn load_config(
    settings: SettingsArgs,
    host: Option<String>,
    port: Option<u16>,
) -> Result<ServiceConfig, AppError> {
    let cwd = std::env::current_dir()?;
    let mut config = ServiceConfig::load(settings.config.as_deref(), &cwd)?;
    config.apply_overrides(host, port, settings.output_dir);
    config.validate()?;
    Ok(config)
}

fn read_payload(input: Option<&Path>) -> Result<Vec<u8>, AppError> {
    match input {
        Some(path) if path != Path::new("-") => Ok(std::fs::read(path)?),
        _ => {
            let mut buffer = Vec::new();
            std::io::stdin().read_to_end(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn run_generate(
    input: Option<PathBuf>,
    settings: SettingsArgs,
    dry_run: bool,
) -> Result<(), AppError> {
    let config = load_config(settings, None, None)?;
    let payload = read_payload(input.as_deref())?;

    if dry_run {
        let dry = helmgen::generate_dry_run(&payload)?;
        for (destination, contents) in &dry.files {
            println!("# {}", config.output.dir.join(destination.relative_path()).display());
            print!("{contents}");
        }
        print_skipped(&dry.outcome.report.skipped_keys);
        return Ok(());
    }

    let outcome = helmgen::generate(&payload, &config.output.dir)?;
    for destination in &outcome.report.written {
        let path = config.output.dir.join(destination.relative_path());
        match destination {
            Destination::Values => println!("✅ Wrote values to {}", path.display()),
            Destination::Manifest(kind) => {
                println!("✅ Wrote {} manifest to {}", kind, path.display())
            }
        }
    }
    print_skipped(&outcome.report.skipped_keys);
    Ok(())
}

fn print_skipped(keys: &[String]) {
    if !keys.is_empty() {
        eprintln!("Skipped keys with no known resource: {}", keys.join(", "));
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result: Result<(), AppError> = match cli.command {
        Commands::Generate { input, settings, dry_run } => run_generate(input, settings, dry_run),
        Commands::Serve { host, port, settings } => match load_config(settings, host, port) {
            Ok(config) => helmgen::serve(&config).await,
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
