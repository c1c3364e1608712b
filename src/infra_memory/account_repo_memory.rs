use super::MemoryDatabase;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::Arc;

pub struct MemoryAccountRepo {
    db: Arc<MemoryDatabase>,
}

impl MemoryAccountRepo {
    pub fn new(db: Arc<MemoryDatabase>) -> Self {
        MemoryAccountRepo { db }
    }
}

#[async_trait::async_trait]
impl AccountRepo for MemoryAccountRepo {
    async fn exists(&self, user_id: UserId) -> Result<bool, RelationError> {
        let tables = self.db.lock()?;
        Ok(tables.is_live(user_id))
    }
}
