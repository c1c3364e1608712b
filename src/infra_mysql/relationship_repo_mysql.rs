use super::util::{ForeignKeyViolation, foreign_key_violation, internal};
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Transaction};

const SQL_LOCK_PAIR: &str = r#"
SELECT owner_id, counterparty_id, status
FROM relationship
WHERE (owner_id = ? AND counterparty_id = ?)
   OR (owner_id = ? AND counterparty_id = ?)
FOR UPDATE
"#;

// Foreign keys only see hard deletes; soft-deleted accounts are filtered here.
const SQL_RETIRED_ACCOUNTS: &str = r#"
SELECT user_id
FROM account
WHERE user_id IN (?, ?)
  AND deleted_at IS NOT NULL
FOR SHARE
"#;

const SQL_PUT_ROW: &str = r#"
INSERT INTO relationship (owner_id, counterparty_id, status)
VALUES (?, ?, ?)
ON DUPLICATE KEY UPDATE status = ?, updated_at = CURRENT_TIMESTAMP(6)
"#;

const SQL_DELETE_ROW: &str = r#"
DELETE FROM relationship
WHERE owner_id = ? AND counterparty_id = ?
"#;

// Own non-pending rows, plus requests addressed to the owner. The requester's own
// pending row is left out so outbound requests stay invisible to the requester.
// A soft-deleted owner sees nothing.
const SQL_LIST_VISIBLE: &str = r#"
SELECT
    a.user_id    AS user_id,
    a.username   AS username,
    a.avatar_id  AS avatar_id,
    r.status     AS status,
    r.updated_at AS since
FROM account o
JOIN relationship r
  ON r.owner_id = o.user_id
  OR r.counterparty_id = o.user_id
JOIN account a
  ON a.user_id = IF(r.owner_id = o.user_id, r.counterparty_id, r.owner_id)
WHERE o.user_id = ?
  AND o.deleted_at IS NULL
  AND a.deleted_at IS NULL
  AND (
        (r.owner_id = o.user_id AND r.status <> 'pending')
     OR (r.counterparty_id = o.user_id AND r.status = 'pending')
  )
ORDER BY a.username DESC,
         a.user_id ASC
"#;

#[derive(sqlx::FromRow)]
struct PairRow {
    owner_id: UserId,
    counterparty_id: UserId,
    status: String,
}

#[derive(sqlx::FromRow)]
struct FriendRow {
    user_id: UserId,
    username: String,
    avatar_id: i32,
    status: String,
    since: DateTime<Utc>,
}

pub struct MySqlRelationshipRepo {
    pool: MySqlPool,
}

impl MySqlRelationshipRepo {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn lock_pair(
        tx: &mut Transaction<'_, MySql>,
        pair: DirectedPair,
    ) -> Result<PairSnapshot, RelationError> {
        let rows: Vec<PairRow> = sqlx::query_as(SQL_LOCK_PAIR)
            .bind(pair.first)
            .bind(pair.second)
            .bind(pair.second)
            .bind(pair.first)
            .fetch_all(&mut **tx)
            .await
            .map_err(internal("lock relationship pair"))?;

        let mut snapshot = PairSnapshot::default();
        for row in rows {
            let status = parse_status(&row.status)?;
            if row.owner_id == pair.first && row.counterparty_id == pair.second {
                snapshot.forward = Some(status);
            } else {
                snapshot.backward = Some(status);
            }
        }

        Ok(snapshot)
    }

    async fn retired_accounts(
        tx: &mut Transaction<'_, MySql>,
        pair: DirectedPair,
    ) -> Result<Vec<UserId>, RelationError> {
        sqlx::query_scalar(SQL_RETIRED_ACCOUNTS)
            .bind(pair.first)
            .bind(pair.second)
            .fetch_all(&mut **tx)
            .await
            .map_err(internal("check retired accounts"))
    }

    async fn apply_write(
        tx: &mut Transaction<'_, MySql>,
        write: &RowWrite,
    ) -> Result<(), RelationError> {
        match write {
            RowWrite::Put(row) => {
                sqlx::query(SQL_PUT_ROW)
                    .bind(row.owner_id)
                    .bind(row.counterparty_id)
                    .bind(row.status.as_str())
                    .bind(row.status.as_str())
                    .execute(&mut **tx)
                    .await
                    .map_err(|e| match foreign_key_violation(&e) {
                        Some(ForeignKeyViolation::Owner) => {
                            RelationError::user_not_found(row.owner_id)
                        }
                        Some(_) => RelationError::user_not_found(row.counterparty_id),
                        None => RelationError::Internal(format!("put relationship row: {e}")),
                    })?;
            }
            RowWrite::Delete {
                owner_id,
                counterparty_id,
            } => {
                sqlx::query(SQL_DELETE_ROW)
                    .bind(*owner_id)
                    .bind(*counterparty_id)
                    .execute(&mut **tx)
                    .await
                    .map_err(internal("delete relationship row"))?;
            }
        }

        Ok(())
    }
}

fn parse_status(status: &str) -> Result<RelationStatus, RelationError> {
    status
        .parse::<RelationStatus>()
        .map_err(RelationError::Internal)
}

#[async_trait::async_trait]
impl RelationshipRepo for MySqlRelationshipRepo {
    async fn mutate_pair(
        &self,
        pair: DirectedPair,
        planner: &Planner<'_>,
    ) -> Result<usize, RelationError> {
        let mut tx = self.pool.begin().await.map_err(internal("begin"))?;

        let snapshot = Self::lock_pair(&mut tx, pair).await?;

        // Dropping `tx` on any early return rolls the whole unit back.
        let writes = planner(&snapshot)?;
        if writes.iter().any(|w| matches!(w, RowWrite::Put(_))) {
            let retired = Self::retired_accounts(&mut tx, pair).await?;
            if let Some(id) = writes.iter().find_map(|w| match w {
                RowWrite::Put(row) => [row.owner_id, row.counterparty_id]
                    .into_iter()
                    .find(|id| retired.contains(id)),
                RowWrite::Delete { .. } => None,
            }) {
                return Err(RelationError::user_not_found(id));
            }
        }
        for write in &writes {
            Self::apply_write(&mut tx, write).await?;
        }

        tx.commit().await.map_err(internal("commit"))?;

        Ok(writes.len())
    }

    async fn list_visible(&self, owner: UserId) -> Result<Vec<FriendSummary>, RelationError> {
        let rows: Vec<FriendRow> = sqlx::query_as(SQL_LIST_VISIBLE)
            .bind(owner)
            .fetch_all(&self.pool)
            .await
            .map_err(internal("list friends"))?;

        rows.into_iter()
            .map(|r| {
                Ok(FriendSummary {
                    user_id: r.user_id,
                    username: r.username,
                    avatar_id: r.avatar_id,
                    status: parse_status(&r.status)?,
                    since: r.since,
                })
            })
            .collect()
    }
}
