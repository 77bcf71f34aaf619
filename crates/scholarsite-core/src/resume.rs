//! Education and work history shown on the About page.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoreError, Result};

/// File name looked up in the content directory.
pub const RESUME_FILE: &str = "resume.yaml";

/// Resume data in file order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub experience: Vec<Experience>,
}

/// A degree or program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub school: String,
    pub degree: String,
    #[serde(default)]
    pub details: Vec<String>,
    /// Free-form period, e.g. "Aug 2021 - May 2025".
    #[serde(default)]
    pub date: String,
}

/// A position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    #[serde(default)]
    pub organization: Option<String>,
    pub role: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl Resume {
    /// Parse resume YAML.
    pub fn from_yaml(source: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(source).map_err(|e| CoreError::resume(path, e.to_string()))
    }

    /// Load `resume.yaml` from a content directory.
    ///
    /// A missing file yields an empty resume.
    pub fn load(content_dir: &Path) -> Result<Self> {
        let path = content_dir.join(RESUME_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no resume file");
            return Ok(Self::default());
        }

        let source = std::fs::read_to_string(&path)?;
        Self::from_yaml(&source, &path)
    }

    /// Whether there is nothing to render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.education.is_empty() && self.experience.is_empty()
    }
}
