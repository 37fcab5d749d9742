//! Manifest advisory checks
//!
//! The vendor manifest is only searched for fixed key substrings. Results are
//! logged and never change runtime behaviour.

use std::path::Path;

/// (feature name, literal text expected in the manifest)
pub const MANIFEST_CHECKS: [(&str, &str); 5] = [
    ("ray_tracing", "\"ray_tracing\": true"),
    ("mesh_shading", "\"mesh_shading\": true"),
    ("BC1 hardware", "\"BC1\": \"hardware\""),
    ("descriptor_indexing", "\"descriptor_indexing\": true"),
    ("synchronization2", "\"synchronization2\": true"),
];

/// Manifest text, or nothing if it could not be read.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestCheck {
    pub name: &'static str,
    pub key: &'static str,
    pub present: bool,
}

impl Manifest {
    pub fn read(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) if !text.is_empty() => Self { text: Some(text) },
            Ok(_) => {
                tracing::warn!(path = %path.display(), "manifest is empty");
                Self::default()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "manifest unreadable");
                Self::default()
            }
        }
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()) }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.text.as_deref().is_some_and(|t| t.contains(key))
    }

    /// Check every advisory key and log the outcome of each.
    pub fn validate_alignment(&self) -> Vec<ManifestCheck> {
        MANIFEST_CHECKS
            .iter()
            .map(|&(name, key)| {
                let present = self.contains(key);
                if present {
                    tracing::info!("MANIFEST_OK: {name}");
                } else {
                    tracing::warn!("MANIFEST_MISMATCH: {name} (missing key={key})");
                }
                ManifestCheck { name, key, present }
            })
            .collect()
    }
}
