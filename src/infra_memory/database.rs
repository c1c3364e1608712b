use crate::application_port::RelationError;
use crate::domain_model::*;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone)]
pub struct AccountRecord {
    pub user_id: UserId,
    pub username: String,
    pub avatar_id: i32,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct RelationRecord {
    pub status: RelationStatus,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub(super) struct Tables {
    pub accounts: BTreeMap<UserId, AccountRecord>,
    pub relationships: BTreeMap<(UserId, UserId), RelationRecord>,
}

impl Tables {
    /// A present account that has not been soft-deleted.
    pub fn is_live(&self, user_id: UserId) -> bool {
        self.accounts
            .get(&user_id)
            .is_some_and(|a| a.deleted_at.is_none())
    }

    /// Applies every write or none of them. Both ends of every put must be live
    /// accounts; this is checked before anything is touched.
    pub fn apply(&mut self, writes: &[RowWrite]) -> Result<(), RelationError> {
        for write in writes {
            if let RowWrite::Put(row) = write {
                for id in [row.owner_id, row.counterparty_id] {
                    if !self.is_live(id) {
                        return Err(RelationError::user_not_found(id));
                    }
                }
            }
        }

        let now = Utc::now();
        for write in writes {
            match *write {
                RowWrite::Put(row) => {
                    self.relationships.insert(
                        (row.owner_id, row.counterparty_id),
                        RelationRecord {
                            status: row.status,
                            updated_at: now,
                        },
                    );
                }
                RowWrite::Delete {
                    owner_id,
                    counterparty_id,
                } => {
                    self.relationships.remove(&(owner_id, counterparty_id));
                }
            }
        }

        Ok(())
    }
}

/// A process-local stand-in for the relationship database, shared by the memory repos
/// the way a connection pool is shared by the MySQL ones.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: Mutex<Tables>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn lock(&self) -> Result<MutexGuard<'_, Tables>, RelationError> {
        self.tables
            .lock()
            .map_err(|e| RelationError::Internal(format!("memory store poisoned: {e}")))
    }

    pub fn insert_account(
        &self,
        user_id: UserId,
        username: &str,
        avatar_id: i32,
    ) -> Result<(), RelationError> {
        let mut tables = self.lock()?;
        if tables.accounts.values().any(|a| a.username == username) {
            return Err(RelationError::InvalidArgument(format!(
                "username {username} already taken"
            )));
        }
        tables.accounts.insert(
            user_id,
            AccountRecord {
                user_id,
                username: username.to_string(),
                avatar_id,
                created_at: Utc::now(),
                deleted_at: None,
            },
        );
        Ok(())
    }

    pub fn soft_delete_account(&self, user_id: UserId) -> Result<(), RelationError> {
        let mut tables = self.lock()?;
        let account = tables
            .accounts
            .get_mut(&user_id)
            .ok_or(RelationError::user_not_found(user_id))?;
        account.deleted_at = Some(Utc::now());
        Ok(())
    }

    /// Every stored directed row, ordered by `(owner_id, counterparty_id)`.
    pub fn relationship_rows(&self) -> Result<Vec<RelationRow>, RelationError> {
        let tables = self.lock()?;
        Ok(tables
            .relationships
            .iter()
            .map(|(&(owner_id, counterparty_id), record)| {
                RelationRow::new(owner_id, counterparty_id, record.status)
            })
            .collect())
    }
}
