use std::sync::Arc;
use tokio::sync::Mutex;

use crate::archive::ArchiveStore;
use crate::llm_client::LlmClient;
use crate::session::Session;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub archive: ArchiveStore,
    /// The single active session: accumulated progress table, current report
    /// and chat history. One user, sequential operations — the mutex is only
    /// there to satisfy `Clone + Send` across handlers.
    pub session: Arc<Mutex<Session>>,
}
