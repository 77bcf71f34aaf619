//! Scholarsite Generator Library
//!
//! Static site generation engine for scholarsite.
//!
//! # Modules
//!
//! - [`template`] - HTML template system with variable interpolation
//! - [`html`] - Page rendering for home, publications, projects and about
//! - [`collector`] - Content collection and normalization
//! - [`assets`] - Static asset copying
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod collector;
pub mod html;
pub mod template;

pub use assets::AssetProcessor;
pub use build::{BuildStats, Builder};
pub use collector::{ContentCollector, SiteContent};
pub use html::HtmlGenerator;
pub use template::{Template, TemplateContext, TemplateRegistry};
