pub mod health;
pub use self::health::health;

pub mod pages;
pub use self::pages::{browse, contact, create, home, notification};

pub mod profile;
pub use self::profile::profile;

pub mod logout;
pub use self::logout::logout;

pub mod user_register;
pub use self::user_register::{register, register_form};

pub mod user_login;
pub use self::user_login::{login, login_form};

// common functions for the handlers
use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub(crate) fn render_template<T: Template>(t: T) -> Response {
    match t.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {e}"),
        )
            .into_response(),
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().is_some_and(|code| code.as_ref() == "23505"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email_trims_and_lowercases() {
        assert_eq!(normalize_email("  Foo@Bar.com "), "foo@bar.com");
        assert_eq!(normalize_email("alice@example.com"), "alice@example.com");
    }

    #[test]
    fn test_normalize_email_is_idempotent() {
        let once = normalize_email(" TeamSwipe@Example.COM ");
        assert_eq!(normalize_email(&once), once);
    }
}
