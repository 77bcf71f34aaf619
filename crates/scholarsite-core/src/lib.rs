//! Scholarsite Core Library
//!
//! Records, configuration, ordering and view logic for the scholarsite
//! academic portfolio generator.

pub mod config;
pub mod content;
pub mod date;
pub mod error;
pub mod format;
pub mod frontmatter;
pub mod normalize;
pub mod record;
pub mod resume;
pub mod view;

pub use config::Config;
pub use content::{ContentKind, ContentPath, SourceFormat};
pub use date::ContentDate;
pub use error::{CoreError, Result};
pub use normalize::{ProjectOrder, normalize_news, normalize_projects, normalize_publications};
pub use record::{
    AuthorRecord, Link, NewsRecord, ProjectRecord, PublicationRecord, PublicationType, Record,
};
pub use resume::Resume;
pub use view::{
    AuthorSegment, FilterAction, FilterCount, FilterKey, FilterState, PublicationView, YearGroup,
};
