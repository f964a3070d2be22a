//! Shared application state handed to every handler.

use surrealdb::engine::remote::ws::Client;

use reclaim_auth::{AccessGate, AuthService};
use reclaim_core::lifecycle::LifecycleController;
use reclaim_db::DbManager;
use reclaim_db::repository::{SurrealAuditRepository, SurrealUserRepository};

use crate::config::ServerConfig;

type Users = SurrealUserRepository<Client>;
type Audits = SurrealAuditRepository<Client>;

pub struct AppState {
    pub config: ServerConfig,
    pub auth: AuthService<Users>,
    pub gate: AccessGate<Users>,
    pub lifecycle: LifecycleController<Audits, Users>,
    pub audits: Audits,
}

impl AppState {
    pub fn new(config: ServerConfig, db: &DbManager) -> Self {
        let auth_config = config.auth_config();

        let users = match &config.password_pepper {
            Some(pepper) => SurrealUserRepository::with_pepper(db.client().clone(), pepper.clone()),
            None => SurrealUserRepository::new(db.client().clone()),
        };
        let audits = SurrealAuditRepository::new(db.client().clone());

        Self {
            auth: AuthService::new(users.clone(), auth_config.clone()),
            gate: AccessGate::new(users.clone(), auth_config),
            lifecycle: LifecycleController::new(audits.clone(), users),
            audits,
            config,
        }
    }
}
