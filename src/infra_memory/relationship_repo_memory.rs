use super::MemoryDatabase;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct MemoryRelationshipRepo {
    db: Arc<MemoryDatabase>,
}

impl MemoryRelationshipRepo {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        Self { db }
    }
}

#[async_trait::async_trait]
impl RelationshipRepo for MemoryRelationshipRepo {
    async fn mutate_pair(
        &self,
        pair: DirectedPair,
        planner: &Planner<'_>,
    ) -> Result<usize, RelationError> {
        let mut tables = self.db.lock()?;

        let status_of = |owner: UserId, counterparty: UserId| {
            tables
                .relationships
                .get(&(owner, counterparty))
                .map(|r| r.status)
        };
        let snapshot = PairSnapshot {
            forward: status_of(pair.first, pair.second),
            backward: status_of(pair.second, pair.first),
        };

        let writes = planner(&snapshot)?;
        tables.apply(&writes)?;

        Ok(writes.len())
    }

    async fn list_visible(&self, owner: UserId) -> Result<Vec<FriendSummary>, RelationError> {
        let tables = self.db.lock()?;
        if !tables.is_live(owner) {
            return Ok(vec![]);
        }

        let mut friends: Vec<FriendSummary> = tables
            .relationships
            .iter()
            .filter_map(|(&(owner_id, counterparty_id), record)| {
                let other = match record.status {
                    RelationStatus::Pending if counterparty_id == owner => owner_id,
                    RelationStatus::Accepted | RelationStatus::Blocked if owner_id == owner => {
                        counterparty_id
                    }
                    _ => return None,
                };
                let account = tables.accounts.get(&other)?;
                if account.deleted_at.is_some() {
                    return None;
                }
                Some(FriendSummary {
                    user_id: other,
                    username: account.username.clone(),
                    avatar_id: account.avatar_id,
                    status: record.status,
                    since: record.updated_at,
                })
            })
            .collect();

        friends.sort_by(|a, b| {
            b.username
                .cmp(&a.username)
                .then_with(|| a.user_id.cmp(&b.user_id))
        });

        Ok(friends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RelationStatus::*;

    fn setup(names: &[&str]) -> (Arc<MemoryDatabase>, MemoryRelationshipRepo, Vec<UserId>) {
        let db = Arc::new(MemoryDatabase::new());
        let ids = names
            .iter()
            .map(|name| {
                let id = UserId::new_v4();
                db.insert_account(id, name, 0).unwrap();
                id
            })
            .collect();
        (db.clone(), MemoryRelationshipRepo::new(db), ids)
    }

    fn fixed(writes: Vec<RowWrite>) -> impl Fn(&PairSnapshot) -> Result<Vec<RowWrite>, RelationError> {
        move |_: &PairSnapshot| Ok(writes.clone())
    }

    #[tokio::test]
    async fn planner_sees_both_directions() {
        let (_db, repo, ids) = setup(&["alice", "bob"]);
        let (a, b) = (ids[0], ids[1]);

        let put = fixed(vec![RowWrite::put(b, a, Pending)]);
        repo.mutate_pair(DirectedPair::new(b, a), &put).await.unwrap();

        let seen = std::sync::Mutex::new(None);
        let observe = |snapshot: &PairSnapshot| -> Result<Vec<RowWrite>, RelationError> {
            *seen.lock().unwrap() = Some(*snapshot);
            Ok(vec![])
        };
        let applied = repo
            .mutate_pair(DirectedPair::new(a, b), &observe)
            .await
            .unwrap();

        assert_eq!(applied, 0);
        assert_eq!(
            seen.lock().unwrap().unwrap(),
            PairSnapshot {
                forward: None,
                backward: Some(Pending),
            }
        );
    }

    #[tokio::test]
    async fn missing_account_aborts_whole_plan() {
        let (db, repo, ids) = setup(&["alice", "bob"]);
        let (a, b) = (ids[0], ids[1]);
        let ghost = UserId::new_v4();

        let accept = fixed(vec![
            RowWrite::put(a, b, Accepted),
            RowWrite::put(b, a, Accepted),
        ]);
        repo.mutate_pair(DirectedPair::new(a, b), &accept)
            .await
            .unwrap();

        // the first write is valid, the second is not: neither may land
        let mixed = fixed(vec![
            RowWrite::delete(a, b),
            RowWrite::put(a, ghost, Blocked),
        ]);
        let err = repo
            .mutate_pair(DirectedPair::new(a, ghost), &mixed)
            .await
            .unwrap_err();
        assert!(
            matches!(err, RelationError::NotFound { ref value, .. } if *value == ghost.to_string())
        );

        let rows = db.relationship_rows().unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.status == Accepted));
    }

    #[tokio::test]
    async fn planner_error_leaves_rows_untouched() {
        let (db, repo, ids) = setup(&["alice", "bob"]);
        let refuse = |_: &PairSnapshot| -> Result<Vec<RowWrite>, RelationError> {
            Err(RelationError::InvalidArgument("nope".to_string()))
        };
        assert!(
            repo.mutate_pair(DirectedPair::new(ids[0], ids[1]), &refuse)
                .await
                .is_err()
        );
        assert!(db.relationship_rows().unwrap().is_empty());
    }

    #[tokio::test]
    async fn listing_orders_by_username_descending_and_skips_deleted() {
        let (db, repo, ids) = setup(&["owner", "anna", "zoe", "mike", "gone"]);
        let owner = ids[0];

        for &other in &ids[1..] {
            let befriend = fixed(vec![
                RowWrite::put(owner, other, Accepted),
                RowWrite::put(other, owner, Accepted),
            ]);
            repo.mutate_pair(DirectedPair::new(owner, other), &befriend)
                .await
                .unwrap();
        }
        db.soft_delete_account(ids[4]).unwrap();

        let names: Vec<String> = repo
            .list_visible(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.username)
            .collect();
        assert_eq!(names, vec!["zoe", "mike", "anna"]);
    }

    #[tokio::test]
    async fn soft_deleted_account_takes_no_new_rows_and_lists_nothing() {
        let (db, repo, ids) = setup(&["alice", "bob"]);
        let (a, b) = (ids[0], ids[1]);

        let request = fixed(vec![RowWrite::put(b, a, Pending)]);
        repo.mutate_pair(DirectedPair::new(b, a), &request)
            .await
            .unwrap();
        db.soft_delete_account(b).unwrap();

        let block = fixed(vec![
            RowWrite::put(a, b, Blocked),
            RowWrite::put(b, a, Blocked),
        ]);
        let err = repo
            .mutate_pair(DirectedPair::new(a, b), &block)
            .await
            .unwrap_err();
        assert!(
            matches!(err, RelationError::NotFound { ref value, .. } if *value == b.to_string())
        );
        assert_eq!(db.relationship_rows().unwrap()[0].status, Pending);

        assert!(repo.list_visible(b).await.unwrap().is_empty());
        // rows pointing at a retired account can still be cleared
        let clear = fixed(vec![RowWrite::delete(b, a)]);
        assert_eq!(
            repo.mutate_pair(DirectedPair::new(a, b), &clear)
                .await
                .unwrap(),
            1
        );
    }
}
