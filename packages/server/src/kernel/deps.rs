//! Server dependencies shared by every request handler.
//!
//! The cascade engine receives its store explicitly; nothing reaches the
//! moderation tables through globals.

use sqlx::PgPool;
use std::sync::Arc;

use crate::domains::auth::JwtService;
use crate::domains::moderation::{CascadeEngine, PgModerationStore};

/// Cascade engine wired to Postgres
pub type PgCascadeEngine = CascadeEngine<PgModerationStore>;

#[derive(Clone)]
pub struct ServerDeps {
    pub db_pool: PgPool,
    /// Approve/reject with dependent promotion and demotion
    pub cascade: Arc<PgCascadeEngine>,
    /// JWT service for token verification
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    pub fn new(db_pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        let cascade = Arc::new(CascadeEngine::new(PgModerationStore::new(db_pool.clone())));
        Self {
            db_pool,
            cascade,
            jwt_service,
        }
    }
}
