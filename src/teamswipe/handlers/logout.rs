use axum::response::{IntoResponse, Redirect};
use tower_sessions::Session;
use tracing::error;

/// Clear all session state and send the client home.
///
/// Calling this without an active session is a no-op followed by the same
/// redirect.
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Err(e) = session.flush().await {
        error!("Failed to clear session: {e}");
    }

    Redirect::to("/")
}
