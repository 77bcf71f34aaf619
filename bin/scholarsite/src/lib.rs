//! Scholarsite CLI library
//!
//! Command implementations and the development server behind the
//! `scholarsite` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (build, watch, new, check)
//! - [`server`] - Development server with live reload
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use scholarsite::cmd;
//!
//! // Build the site described by config.toml into its configured output directory
//! cmd::build::run(Path::new("config.toml"), None, false, None).unwrap();
//! ```

pub mod cmd;
pub mod server;

pub use scholarsite_core::{Config, PublicationRecord};
pub use scholarsite_generator::{BuildStats, Builder, ContentCollector, SiteContent};

/// Initialize tracing with the specified verbosity level.
///
/// `verbose` maps 0 to WARN, 1 to INFO, 2 to DEBUG and 3+ to TRACE.
/// `RUST_LOG` directives are honored on top of that level.
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
