//! Data-quality issues collected while loading a source.
//!
//! None of these abort anything. They are logged once when recorded and
//! kept on the snapshot for callers that want to surface them.

use serde::Serialize;

use crate::model::{EntityId, RelationKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum DataQualityIssue {
    /// A relation points at an id that is not in the source.
    DanglingRelation { from: EntityId, to: EntityId, kind: RelationKind },
    /// A later record reused an id; the first one was kept.
    DuplicateId { id: EntityId, index: usize },
    /// A record could not be read at all and was skipped.
    MalformedRecord { index: usize, reason: String },
    /// A monetary value was present but not numeric; treated as absent.
    MalformedAmount { id: EntityId, field: String },
}

impl std::fmt::Display for DataQualityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataQualityIssue::DanglingRelation { from, to, kind } => {
                write!(f, "{from} has a {kind:?} relation to missing entity {to}")
            }
            DataQualityIssue::DuplicateId { id, index } => {
                write!(f, "record {index} reuses id {id}")
            }
            DataQualityIssue::MalformedRecord { index, reason } => {
                write!(f, "record {index} skipped: {reason}")
            }
            DataQualityIssue::MalformedAmount { id, field } => {
                write!(f, "{id}.{field} is not a number")
            }
        }
    }
}

/// Accumulates issues and logs each one as it is recorded.
#[derive(Debug, Default)]
pub struct IssueLog {
    issues: Vec<DataQualityIssue>,
}

impl IssueLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, issue: DataQualityIssue) {
        tracing::warn!(%issue, "data quality");
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = DataQualityIssue>) {
        for issue in issues {
            self.record(issue);
        }
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn into_vec(self) -> Vec<DataQualityIssue> {
        self.issues
    }
}
