//! A running report and the per-test handles that write into it.
//!
//! The session owns both the tree and the category registry, and is shared
//! by reference. Tests running in parallel each hold their own
//! [`TestContext`]; nothing is global or thread-local.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ReportConfig, Theme};
use crate::model::{CodeLanguage, Color, LogEntry, Markup, NodeId, NodeSnapshot, Report, Status};
use crate::sink::ReportSink;
use crate::tags::TestTags;
use crate::ReportError;

/// Summary shown for the collapsible failure trace.
pub const FAILURE_DETAILS_SUMMARY: &str = "Click here to see detail exception logs";

/// Category nodes by name, and sub-category nodes by (category, sub-category).
#[derive(Debug, Default)]
pub struct NodeRegistry {
    categories: IndexMap<String, NodeId>,
    sub_categories: IndexMap<(String, String), NodeId>,
}

impl NodeRegistry {
    pub fn category(&self, name: &str) -> Option<NodeId> {
        self.categories.get(name).copied()
    }

    pub fn sub_category(&self, category: &str, sub_category: &str) -> Option<NodeId> {
        self.sub_categories
            .get(&(category.to_string(), sub_category.to_string()))
            .copied()
    }

    fn category_or_create(&mut self, report: &mut Report, name: &str) -> NodeId {
        *self.categories.entry(name.to_string()).or_insert_with(|| {
            debug!(category = name, "creating category node");
            report.create_root(name)
        })
    }

    fn sub_category_or_create(
        &mut self,
        report: &mut Report,
        parent: NodeId,
        category: &str,
        sub_category: &str,
    ) -> Option<NodeId> {
        let key = (category.to_string(), sub_category.to_string());
        if let Some(&id) = self.sub_categories.get(&key) {
            return Some(id);
        }
        debug!(category, sub_category, "creating sub-category node");
        let id = report.create_child(parent, sub_category)?;
        self.sub_categories.insert(key, id);
        Some(id)
    }
}

#[derive(Debug, Default)]
struct SessionState {
    report: Report,
    registry: NodeRegistry,
}

pub struct ReportSession {
    config: ReportConfig,
    started_at: DateTime<Local>,
    file_name: String,
    state: Mutex<SessionState>,
}

impl ReportSession {
    /// Open a session. The report file name is fixed from `started_at`.
    pub fn start(config: ReportConfig, started_at: DateTime<Local>) -> Self {
        let file_name = config.file_name(&started_at.naive_local());
        info!(report = %config.report_name, file = %file_name, "report session started");
        Self {
            config,
            started_at,
            file_name,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// `output_dir/file_name`
    pub fn output_path(&self) -> PathBuf {
        self.config.output_dir.join(&self.file_name)
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// File a new test under its category and sub-category nodes.
    ///
    /// Both parents are created on first use and reused afterwards. The
    /// sub-category node gets the main category and author assigned, the
    /// test node the section tag. Returns `None` for a test with no groups.
    pub fn start_test<S: AsRef<str>>(&self, groups: &[S], description: &str) -> Option<TestContext<'_>> {
        if groups.is_empty() {
            return None;
        }
        let tags = TestTags::from_groups(groups);

        let mut guard = self.state();
        let SessionState { report, registry } = &mut *guard;
        let category = registry.category_or_create(report, &tags.main_category);
        let sub_category =
            registry.sub_category_or_create(report, category, &tags.main_category, &tags.sub_category)?;
        let test = report.create_child(sub_category, description)?;
        report.assign_category(sub_category, &tags.main_category);
        report.assign_author(sub_category, &tags.author);
        report.assign_category(test, &tags.section);
        debug!(test = description, "test node created");

        Some(TestContext {
            session: self,
            node: test,
        })
    }

    pub fn category(&self, name: &str) -> Option<NodeId> {
        self.state().registry.category(name)
    }

    pub fn sub_category(&self, category: &str, sub_category: &str) -> Option<NodeId> {
        self.state().registry.sub_category(category, sub_category)
    }

    /// `None` for a node that is not part of this session.
    pub fn status(&self, node: NodeId) -> Option<Status> {
        self.state().report.status(node)
    }

    pub fn snapshot(&self) -> ReportSnapshot {
        let state = self.state();
        let tests: Vec<NodeSnapshot> = state
            .report
            .roots()
            .iter()
            .filter_map(|&root| state.report.snapshot_node(root))
            .collect();
        let status = tests
            .iter()
            .map(|t| t.status)
            .fold(Status::Pass, Status::max);
        ReportSnapshot {
            report_name: self.config.report_name.clone(),
            document_title: self.config.document_title.clone(),
            theme: self.config.theme,
            encoding: self.config.encoding.clone(),
            started_at: self.started_at,
            status,
            tests,
        }
    }

    /// Hand the finished report to `sink`.
    pub fn finish(&self, sink: &dyn ReportSink) -> Result<(), ReportError> {
        let snapshot = self.snapshot();
        sink.write(&snapshot)?;
        info!(status = ?snapshot.status, "report flushed");
        Ok(())
    }

    fn log(&self, node: NodeId, status: Status, markup: Markup) {
        if !self.state().report.log(node, LogEntry::new(status, markup)) {
            warn!(?node, "log entry for unknown report node dropped");
        }
    }
}

/// Everything a renderer needs, detached from the live session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSnapshot {
    pub report_name: String,
    pub document_title: String,
    pub theme: Theme,
    pub encoding: String,
    pub started_at: DateTime<Local>,
    pub status: Status,
    pub tests: Vec<NodeSnapshot>,
}

/// Handle on one report node, passed explicitly to whatever logs for a test.
#[derive(Clone, Copy)]
pub struct TestContext<'a> {
    session: &'a ReportSession,
    node: NodeId,
}

impl TestContext<'_> {
    pub fn node(&self) -> NodeId {
        self.node
    }

    fn label(&self, status: Status, text: &str, color: Color) {
        self.session.log(
            self.node,
            status,
            Markup::Label {
                text: text.to_string(),
                color,
            },
        );
    }

    pub fn pass(&self, text: &str) {
        self.label(Status::Pass, text, Color::Green);
    }

    pub fn fail(&self, text: &str) {
        self.label(Status::Fail, text, Color::Red);
    }

    pub fn info(&self, text: &str) {
        self.label(Status::Info, text, Color::Grey);
    }

    pub fn warning(&self, text: &str) {
        self.label(Status::Warning, text, Color::Yellow);
    }

    /// Plain failure text with no label styling.
    pub fn exception(&self, text: &str) {
        self.session.log(
            self.node,
            Status::Fail,
            Markup::Text {
                text: text.to_string(),
            },
        );
    }

    pub fn json(&self, json: &str) {
        self.session.log(
            self.node,
            Status::Info,
            Markup::CodeBlock {
                code: json.to_string(),
                language: CodeLanguage::Json,
            },
        );
    }

    /// Two-column name/value table.
    pub fn headers(&self, headers: &[(String, String)]) {
        let rows = headers
            .iter()
            .map(|(name, value)| vec![name.clone(), value.clone()])
            .collect();
        self.session.log(self.node, Status::Info, Markup::Table { rows });
    }

    /// Failure message, then the trace frames folded under a details entry.
    pub fn record_failure<S: AsRef<str>>(&self, message: &str, frames: &[S]) {
        self.fail(message);
        self.session.log(
            self.node,
            Status::Fail,
            Markup::Details {
                summary: FAILURE_DETAILS_SUMMARY.to_string(),
                lines: frames.iter().map(|f| f.as_ref().to_string()).collect(),
            },
        );
    }
}
