use std::sync::Arc;

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::AppConfig;
use crate::mailer::{Mailer, NoopMailer, SmtpMailer};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub mailer: Arc<dyn Mailer>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        // Lazy pool: an unreachable database does not stop the process; the
        // failure surfaces via /health and per-request errors.
        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect_lazy(&config.database_url)
            .context("parse DATABASE_URL")?;
        if let Err(e) = sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(&db).await {
            tracing::warn!(error = %e, "database unreachable at startup; starting degraded");
        }

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => Arc::new(SmtpMailer::new(smtp)?),
            None => {
                tracing::warn!("SMTP not configured; low stock alerts disabled");
                Arc::new(NoopMailer)
            }
        };

        Ok(Self { db, config, mailer })
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>, mailer: Arc<dyn Mailer>) -> Self {
        Self { db, config, mailer }
    }
}
