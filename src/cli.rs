use clap::{ArgGroup, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "repodoc")]
#[command(about = "GitHub repository analyzer and README generator", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides config and REPODOC_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config and REPODOC_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Analyze one repository and print the report as JSON
    #[command(group(ArgGroup::new("source").required(true).args(["repo_url", "path"])))]
    Analyze {
        /// Repository URL, e.g. https://github.com/owner/repo
        repo_url: Option<String>,

        /// Analyze a local directory instead of a GitHub repository
        #[arg(long)]
        path: Option<PathBuf>,

        /// Clone the repository to measure Python complexity
        #[arg(long = "local-complexity")]
        local_complexity: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print only the generated README
        #[arg(long = "readme-only")]
        readme_only: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_requires_a_source() {
        assert!(Cli::try_parse_from(["repodoc", "analyze"]).is_err());
        assert!(Cli::try_parse_from([
            "repodoc",
            "analyze",
            "https://github.com/a/b",
            "--path",
            "."
        ])
        .is_err());
    }

    #[test]
    fn test_analyze_url_with_flags() {
        let cli = Cli::try_parse_from([
            "repodoc",
            "analyze",
            "https://github.com/acme/widget",
            "--local-complexity",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze {
                repo_url,
                local_complexity,
                path,
                ..
            } => {
                assert_eq!(repo_url.as_deref(), Some("https://github.com/acme/widget"));
                assert!(local_complexity);
                assert!(path.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_serve_overrides() {
        let cli = Cli::try_parse_from(["repodoc", "serve", "--port", "8080"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Serve {
                host: None,
                port: Some(8080)
            }
        ));
    }
}
