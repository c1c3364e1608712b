use super::util::internal;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::MySqlPool;

pub struct MySqlAccountRepo {
    pool: MySqlPool,
}

impl MySqlAccountRepo {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlAccountRepo { pool }
    }
}

#[async_trait::async_trait]
impl AccountRepo for MySqlAccountRepo {
    async fn exists(&self, user_id: UserId) -> Result<bool, RelationError> {
        let count: i64 = sqlx::query_scalar(
            r#"
SELECT COUNT(1)
FROM account
WHERE user_id = ? AND deleted_at IS NULL
"#,
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(internal("query account"))?;

        Ok(count > 0)
    }
}
