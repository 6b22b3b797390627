use std::sync::Arc;

use noteful_db::store::DocumentStore;

use crate::auth::AuthProvider;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Persistence for users, folders, tags and notes.
    pub store: Arc<dyn DocumentStore>,
    /// Credential checks and token issuance.
    pub auth: Arc<dyn AuthProvider>,
    pub config: Arc<ServerConfig>,
}
