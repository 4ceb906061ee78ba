use clap::Parser;
use lookalike::cli::commands::{Cli, Commands};
use lookalike::config::Settings;
use lookalike::domain::entities::feature_vector::FeatureVector;
use lookalike::domain::error::DomainError;
use lookalike::Lookalike;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let settings = match load_settings(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_command(&settings, cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays machine-readable JSON.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("lookalike=debug,warn")
        } else {
            EnvFilter::new("lookalike=info,warn")
        }
    });
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings, DomainError> {
    let mut settings = Settings::from_env()?;
    if let Some(dir) = &cli.data_dir {
        if std::env::var_os("LOOKALIKE_DB").is_none() {
            settings.db_path = dir.join("lookalike.db");
        }
        settings.data_dir = dir.clone();
    }
    if let Some(source) = &cli.source {
        settings.source = source.parse().map_err(DomainError::InvalidInput)?;
    }
    Ok(settings)
}

async fn run_command(settings: &Settings, cmd: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        Commands::Search { vector, image, top_k } => {
            let k = match top_k {
                Some(k) => usize::try_from(k).unwrap_or(0),
                None => settings.top_k,
            };
            let engine = open(settings)?;
            let results = match (vector, image) {
                (Some(raw), _) => {
                    let values: Vec<f32> = serde_json::from_str(&raw)
                        .map_err(|e| DomainError::Parse(format!("Invalid --vector: {e}")))?;
                    engine.search_vector(&FeatureVector::new(values)?, k)?
                }
                (None, Some(path)) => engine.search_image(&path, k).await?,
                (None, None) => return Err("Either --vector or --image is required".into()),
            };
            let body = serde_json::json!({ "results": results });
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Commands::Stats => {
            let stats = open(settings)?.stats();
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Commands::Import { db } => {
            let db_path = db.unwrap_or_else(|| settings.db_path.clone());
            let summary = lookalike::import_snapshot(settings, &db_path.to_string_lossy())?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}

fn open(settings: &Settings) -> Result<Lookalike, DomainError> {
    Lookalike::open(settings).map_err(|e| {
        tracing::error!(
            error = %e,
            data_dir = %settings.data_dir.display(),
            "Index failed to load"
        );
        e
    })
}
