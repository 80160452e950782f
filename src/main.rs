use anyhow::{Context, Result};
use clap::Parser;
use repodoc::cli::{Cli, Commands};
use repodoc::config::{load_config, AppConfig};
use repodoc::observability::init_tracing;
use repodoc::{server, AnalysisReport, AnalysisService};
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    // Runs before the subscriber exists; a bad config file is returned as an error
    let config = load_config().context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(run(cli.command, config))
}

async fn run(command: Commands, mut config: AppConfig) -> Result<()> {
    match command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let service = AnalysisService::from_config(&config)
                .context("Failed to initialize analysis service")?;
            server::serve(&config.server, Arc::new(service))
                .await
                .context("Server error")?;
            Ok(())
        }
        Commands::Analyze {
            repo_url,
            path,
            local_complexity,
            output,
            readme_only,
        } => {
            let service = AnalysisService::from_config(&config)
                .context("Failed to initialize analysis service")?
                .with_local_complexity(local_complexity || config.analysis.local_complexity);

            let report = match (repo_url, path) {
                (_, Some(path)) => service
                    .analyze_local(&path)
                    .await
                    .with_context(|| format!("Failed to analyze {}", path.display()))?,
                (Some(url), None) => service
                    .analyze(&url)
                    .await
                    .with_context(|| format!("Failed to analyze {}", url))?,
                (None, None) => anyhow::bail!("Either a repository URL or --path is required"),
            };

            write_report(&report, output, readme_only)
        }
    }
}

fn write_report(report: &AnalysisReport, output: Option<PathBuf>, readme_only: bool) -> Result<()> {
    let rendered = if readme_only {
        report.documentation.readme.clone()
    } else {
        serde_json::to_string_pretty(report).context("Failed to serialize report")?
    };

    match output {
        Some(path) => std::fs::write(&path, rendered)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", rendered);
            Ok(())
        }
    }
}
