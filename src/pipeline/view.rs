//! What the dashboard shows for one feed run.

use serde::Serialize;
use std::sync::Arc;

use crate::feed::FeedError;
use crate::types::{ApproachTable, ChartPoint};

/// Outcome of a feed run, ready to render.
///
/// Serialized with a `status` tag: `approaches`, `no_approaches` or `unavailable`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedView {
    /// At least one approach: the table plus its lunar-distance chart.
    Approaches {
        table: Arc<ApproachTable>,
        chart: Vec<ChartPoint>,
    },
    /// The query succeeded and nothing matched. Not an error.
    NoApproaches { message: String },
    /// The run failed; `code` is the [`FeedError::code`].
    Unavailable { code: &'static str, message: String },
}

impl FeedView {
    pub fn from_outcome(
        outcome: Result<Arc<ApproachTable>, FeedError>,
        no_approaches_message: &str,
    ) -> Self {
        match outcome {
            Ok(table) if table.is_empty() => FeedView::NoApproaches {
                message: no_approaches_message.to_string(),
            },
            Ok(table) => {
                let chart = table.chart_series();
                FeedView::Approaches { table, chart }
            }
            Err(e) => FeedView::Unavailable {
                code: e.code(),
                message: e.to_string(),
            },
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, FeedView::Unavailable { .. })
    }
}
