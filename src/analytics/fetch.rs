//! Degrading fetches: a failed query yields an empty row set plus a recorded issue,
//! so a report still renders with whatever data did load.

use crate::errors::{ErrorKind, Result};
use serde::Serialize;
use std::future::Future;
use tracing::{debug, warn};

/// A data source that failed while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportIssue {
    /// Which fetch failed, e.g. `"donations"`
    pub source: &'static str,
    /// Classified cause
    pub kind: ErrorKind,
    /// Original error text
    pub message: String,
}

/// Rows from one fetch, plus the issue if it failed.
#[derive(Debug)]
pub struct Fetched<T> {
    /// Loaded rows; empty when the fetch failed
    pub rows: Vec<T>,
    /// Present when the fetch failed
    pub issue: Option<ReportIssue>,
}

impl<T> Fetched<T> {
    /// Moves any issue into `issues` and returns the rows.
    pub fn take(self, issues: &mut Vec<ReportIssue>) -> Vec<T> {
        if let Some(issue) = self.issue {
            issues.push(issue);
        }
        self.rows
    }
}

/// Awaits `query`, converting an error into an empty result with a [`ReportIssue`].
pub async fn fetch_rows<T, F>(source: &'static str, query: F) -> Fetched<T>
where
    F: Future<Output = Result<Vec<T>>>,
{
    match query.await {
        Ok(rows) => {
            debug!(source, rows = rows.len(), "fetched rows");
            Fetched { rows, issue: None }
        }
        Err(err) => {
            let kind = err.kind();
            warn!(source, ?kind, error = %err, "fetch failed, continuing with no rows");
            Fetched {
                rows: Vec::new(),
                issue: Some(ReportIssue {
                    source,
                    kind,
                    message: err.to_string(),
                }),
            }
        }
    }
}
