use crate::teamswipe::{handlers::render_template, session::SESSION_USER_EMAIL};
use askama::Template;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::error;

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate<'a> {
    email: &'a str,
}

/// Session-gated profile page.
///
/// Anonymous clients are sent to the login form; authenticated clients get
/// the profile rendered with the session's email as display data.
pub async fn profile(session: Session) -> Response {
    match session.get::<String>(SESSION_USER_EMAIL).await {
        Ok(Some(email)) => render_template(ProfileTemplate { email: &email }),
        Ok(None) => Redirect::to("/login").into_response(),
        Err(e) => {
            error!("Failed to read session: {e}");

            Redirect::to("/login").into_response()
        }
    }
}
