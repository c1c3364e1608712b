use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql;
use crate::infra_mysql::*;
use crate::logger::*;
use crate::settings::Settings;
use anyhow::anyhow;
use sqlx::MySqlPool;
use std::sync::Arc;

const SIGNING_KEY_ENV: &str = "JWT_SIGNING_KEY";

pub struct Server {
    pub relationship_service: Arc<dyn RelationshipService>,
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pool: Option<MySqlPool>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let (relationship_repo, account_repo, pool): (
            Arc<dyn RelationshipRepo>,
            Arc<dyn AccountRepo>,
            Option<MySqlPool>,
        ) = match settings.store.backend.as_str() {
            "memory" => {
                let db = Arc::new(MemoryDatabase::new());
                for seed in &settings.store.seed_accounts {
                    db.insert_account(seed.user_id, &seed.username, seed.avatar_id)?;
                }
                info!(accounts = settings.store.seed_accounts.len(), "memory store ready");
                (
                    Arc::new(MemoryRelationshipRepo::new(db.clone())),
                    Arc::new(MemoryAccountRepo::new(db)),
                    None,
                )
            }
            "mysql" => {
                let pool =
                    infra_mysql::connect(&settings.store.dsn, settings.store.max_connections)
                        .await?;
                if settings.store.run_migrations {
                    infra_mysql::run_migrations(&pool).await?;
                    info!("migrations applied");
                }
                (
                    Arc::new(MySqlRelationshipRepo::new(pool.clone())),
                    Arc::new(MySqlAccountRepo::new(pool.clone())),
                    Some(pool),
                )
            }
            other => return Err(anyhow!("Unknown store backend: {}", other)),
        };

        let identity_verifier: Arc<dyn IdentityVerifier> = match settings.auth.backend.as_str() {
            "fake" => {
                warn!("fake identity backend accepts unsigned tokens");
                Arc::new(FakeIdentityVerifier::new())
            }
            "jwt" => {
                let signing_key = std::env::var(SIGNING_KEY_ENV)
                    .map_err(|_| anyhow!("{} must be set for the jwt backend", SIGNING_KEY_ENV))?
                    .into_bytes();
                Arc::new(JwtHs256Verifier::new(JwtConfig {
                    issuer: settings.auth.issuer.clone(),
                    audience: settings.auth.audience.clone(),
                    signing_key,
                }))
            }
            other => return Err(anyhow!("Unknown auth backend: {}", other)),
        };

        let relationship_service: Arc<dyn RelationshipService> = Arc::new(
            RealRelationshipService::new(relationship_repo, account_repo, settings.social),
        );
        debug!(policy = ?settings.social);

        info!(
            store = %settings.store.backend,
            auth = %settings.auth.backend,
            "server started"
        );

        Ok(Self {
            relationship_service,
            identity_verifier,
            pool,
        })
    }

    /// Assembles a server from already built services, without any pool to close.
    pub fn from_services(
        relationship_service: Arc<dyn RelationshipService>,
        identity_verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        Self {
            relationship_service,
            identity_verifier,
            pool: None,
        }
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");

        if let Some(pool) = &self.pool {
            pool.close().await;
            info!("mysql pool closed");
        }
    }
}
