/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - gate: AuthGate (設定は Arc で共有、読み取り専用)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use crate::middleware::auth::AuthGate;

#[derive(Clone, Debug)]
pub struct AppState {
    pub gate: AuthGate,
}

impl AppState {
    pub fn new(gate: AuthGate) -> Self {
        Self { gate }
    }

    /// Where the gate stores claims for downstream handlers.
    pub fn context_key(&self) -> &str {
        &self.gate.config().context_key
    }
}
