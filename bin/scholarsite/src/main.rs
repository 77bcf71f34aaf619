//! Scholarsite CLI
//!
//! Static site generator for academic portfolios.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use scholarsite::cmd::new::NewKind;

/// Command-line interface for Scholarsite.
#[derive(Parser)]
#[command(
    name = "scholarsite",
    version,
    about = "Static site generator for academic portfolios"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the static site
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include draft records
        #[arg(long)]
        drafts: bool,
        /// Override site base URL (e.g., https://example.com)
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Start development server with live reload
    Watch {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Open browser automatically
        #[arg(long)]
        open: bool,
    },
    /// Scaffold a new publication, project or news item
    New {
        /// Kind of record to create
        #[arg(value_enum)]
        kind: NewKind,
        /// Slug for the new file (e.g., chi-2026)
        slug: String,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    scholarsite::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            output,
            drafts,
            base_url,
        } => {
            scholarsite::cmd::build::run(
                &cli.config,
                output.as_deref(),
                drafts,
                base_url.as_deref(),
            )?;
        }
        Commands::Watch { port, open } => {
            scholarsite::cmd::watch::run(&cli.config, port, open).await?;
        }
        Commands::New { kind, slug } => {
            scholarsite::cmd::new::run(&cli.config, kind, &slug)?;
        }
        Commands::Check { strict } => {
            scholarsite::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_cli_build_command_parsing() {
        let args = ["scholarsite", "build", "--output", "dist"];
        let cli = Cli::parse_from(args);

        assert_eq!(cli.config, PathBuf::from("config.toml"));
        assert_eq!(cli.verbose, 0);

        match cli.command {
            Commands::Build {
                output,
                drafts,
                base_url,
            } => {
                assert_eq!(output, Some(PathBuf::from("dist")));
                assert!(!drafts);
                assert!(base_url.is_none());
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_defaults_to_configured_output() {
        let cli = Cli::parse_from(["scholarsite", "build", "--drafts"]);

        match cli.command {
            Commands::Build { output, drafts, .. } => {
                assert!(output.is_none());
                assert!(drafts);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_build_with_base_url() {
        let args = ["scholarsite", "build", "--base-url", "https://sung.example"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Build { base_url, .. } => {
                assert_eq!(base_url.as_deref(), Some("https://sung.example"));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_cli_watch_command_parsing() {
        let args = ["scholarsite", "watch", "--port", "8080", "--open"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::Watch { port, open } => {
                assert_eq!(port, 8080);
                assert!(open);
            }
            _ => panic!("Expected Watch command"),
        }
    }

    #[test]
    fn test_cli_new_command_parsing() {
        let args = ["scholarsite", "new", "publication", "chi-2026"];
        let cli = Cli::parse_from(args);

        match cli.command {
            Commands::New { kind, slug } => {
                assert_eq!(kind, NewKind::Publication);
                assert_eq!(slug, "chi-2026");
            }
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_cli_new_rejects_unknown_kind() {
        let result = Cli::try_parse_from(["scholarsite", "new", "blog", "hello"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_check_command_parsing() {
        let cli = Cli::parse_from(["scholarsite", "check", "--strict"]);

        match cli.command {
            Commands::Check { strict } => assert!(strict),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_verbosity_flags() {
        let cli = Cli::parse_from(["scholarsite", "-vvv", "build"]);
        assert_eq!(cli.verbose, 3);
    }

    #[test]
    fn test_cli_custom_config_path() {
        let cli = Cli::parse_from(["scholarsite", "--config", "demo/config.toml", "check"]);
        assert_eq!(cli.config, PathBuf::from("demo/config.toml"));
    }
}
