mod account_repo_mysql;
mod relationship_repo_mysql;

pub use account_repo_mysql::*;
pub use relationship_repo_mysql::*;

mod util;

use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

pub async fn connect(dsn: &str, max_connections: u32) -> anyhow::Result<MySqlPool> {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect(dsn)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &MySqlPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
