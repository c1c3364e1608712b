use crate::domain_model::UserId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationStatus {
    Pending,
    Accepted,
    Blocked,
}

impl RelationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationStatus::Pending => "pending",
            RelationStatus::Accepted => "accepted",
            RelationStatus::Blocked => "blocked",
        }
    }
}

impl fmt::Display for RelationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RelationStatus::Pending),
            "accepted" => Ok(RelationStatus::Accepted),
            "blocked" => Ok(RelationStatus::Blocked),
            other => Err(format!("unknown relation status: {other}")),
        }
    }
}

/// One directed row of the relationship table, seen from `owner_id`.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RelationRow {
    pub owner_id: UserId,
    pub counterparty_id: UserId,
    pub status: RelationStatus,
}

impl RelationRow {
    pub fn new(owner_id: UserId, counterparty_id: UserId, status: RelationStatus) -> Self {
        Self {
            owner_id,
            counterparty_id,
            status,
        }
    }
}

/// Status of both directed rows of a pair, as read under lock.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct PairSnapshot {
    /// Row `first -> second`.
    pub forward: Option<RelationStatus>,
    /// Row `second -> first`.
    pub backward: Option<RelationStatus>,
}

impl PairSnapshot {
    pub fn is_empty(&self) -> bool {
        self.forward.is_none() && self.backward.is_none()
    }

    pub fn is_symmetric_with(&self, status: RelationStatus) -> bool {
        self.forward == Some(status) && self.backward == Some(status)
    }
}

/// A single row mutation. A plan is an ordered list of these, applied all-or-nothing.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RowWrite {
    /// Insert the row or overwrite its status.
    Put(RelationRow),
    Delete {
        owner_id: UserId,
        counterparty_id: UserId,
    },
}

impl RowWrite {
    pub fn put(owner_id: UserId, counterparty_id: UserId, status: RelationStatus) -> Self {
        RowWrite::Put(RelationRow::new(owner_id, counterparty_id, status))
    }

    pub fn delete(owner_id: UserId, counterparty_id: UserId) -> Self {
        RowWrite::Delete {
            owner_id,
            counterparty_id,
        }
    }
}
