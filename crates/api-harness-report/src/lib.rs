//! Hierarchical test report for API test runs.
//!
//! Tests are filed as category → sub-category → test, from their group
//! tags. A [`ReportSession`] owns the tree and the category registry; each
//! test logs through its own [`TestContext`].
//!
//! # Example
//!
//! ```
//! use api_harness_report::{ReportConfig, ReportSession, Status};
//! use chrono::Local;
//!
//! let session = ReportSession::start(ReportConfig::default(), Local::now());
//! let test = session
//!     .start_test(&["MC:Charges", "SC:Create", "SECTION:Smoke", "AUTHOR:qa"], "Create charge with KWD")
//!     .unwrap();
//! test.info("POST /v2/charges");
//! test.json(r#"{"amount":1,"currency":"KWD"}"#);
//! test.pass("Charge created");
//!
//! let charges = session.category("Charges").unwrap();
//! assert_eq!(session.status(charges), Some(Status::Pass));
//! ```

use thiserror::Error;

pub mod config;
pub use config::{report_file_name, ReportConfig, Theme};

pub mod model;
pub use model::{CodeLanguage, Color, LogEntry, Markup, Node, NodeId, NodeSnapshot, Report, Status};

pub mod tags;
pub use tags::TestTags;

pub mod session;
pub use session::{NodeRegistry, ReportSession, ReportSnapshot, TestContext, FAILURE_DETAILS_SUMMARY};

pub mod sink;
pub use sink::{JsonFileSink, ReportSink};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("invalid report config: {0}")]
    Config(#[from] toml::de::Error),
}
