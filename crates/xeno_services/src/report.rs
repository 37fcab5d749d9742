//! Feature dump written once at initialization

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write feature dump: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize feature dump: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureDump {
    pub device: String,
    /// Unix seconds.
    pub timestamp: String,
    pub features: DumpedFeatures,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpedFeatures {
    pub ray_tracing: bool,
    pub mesh_shading: bool,
    pub descriptor_indexing: bool,
    pub buffer_device_address: bool,
}

impl FeatureDump {
    pub fn for_device(device: &str) -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            device: device.to_string(),
            timestamp: secs.to_string(),
            features: DumpedFeatures {
                ray_tracing: true,
                mesh_shading: true,
                descriptor_indexing: true,
                buffer_device_address: true,
            },
        }
    }

    pub fn write_to(&self, path: &Path) -> Result<(), ReportError> {
        crate::side_log::ensure_parent_dir(path);
        let file = File::create(path)?;
        let mut out = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut out, self)?;
        out.write_all(b"\n")?;
        out.flush()?;
        out.get_ref().sync_all()?;
        tracing::info!(path = %path.display(), "feature dump written");
        Ok(())
    }
}
