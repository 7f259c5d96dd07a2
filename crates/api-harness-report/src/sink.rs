//! Where a finished report goes.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use crate::session::{ReportSession, ReportSnapshot};
use crate::ReportError;

/// Receives the report once the run is over.
///
/// Rendering to a viewable format is up to the implementation; the snapshot
/// carries the complete tree.
pub trait ReportSink {
    fn write(&self, report: &ReportSnapshot) -> Result<(), ReportError>;
}

/// Writes the snapshot as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink at the session's `output_dir/file_name`.
    pub fn for_session(session: &ReportSession) -> Self {
        Self::new(session.output_path())
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ReportSink for JsonFileSink {
    fn write(&self, report: &ReportSnapshot) -> Result<(), ReportError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let text = serde_json::to_string_pretty(report)?;
        fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), "report written");
        Ok(())
    }
}
