use crate::teamswipe::{
    handlers::{normalize_email, render_template},
    session::SESSION_USER_EMAIL,
};
use askama::Template;
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use tower_sessions::Session;
use tracing::{debug, error, info_span, Instrument};
use utoipa::ToSchema;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserLogin {
    email: String,
    password: String,
}

// login form, no side effects
pub async fn login_form() -> Response {
    render_template(LoginTemplate)
}

#[utoipa::path(
    post,
    path = "/login",
    request_body(content = UserLogin, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Login successful, redirects to the profile page"),
        (status = 401, description = "Invalid email or password"),
    ),
    tag = "login"
)]
pub async fn login(
    pool: Extension<PgPool>,
    session: Session,
    payload: Option<Form<UserLogin>>,
) -> Response {
    let user: UserLogin = match payload {
        Some(Form(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = normalize_email(&user.email);

    debug!("login request for {email}");

    // Unknown email and wrong password produce the same response
    let stored_hash = match get_password_hash(&pool, &email).await {
        Ok(Some(hash)) => hash,

        Ok(None) => {
            debug!("User not found");

            return (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            )
                .into_response();
        }

        Err(e) => {
            error!("Error getting password from database: {e}");

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error getting password".to_string(),
            )
                .into_response();
        }
    };

    match bcrypt::verify(&user.password, &stored_hash) {
        Ok(true) => (),

        Ok(false) => {
            debug!("Unauthorized");

            return (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            )
                .into_response();
        }

        Err(e) => {
            error!("Error verifying password: {e}");

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error verifying password".to_string(),
            )
                .into_response();
        }
    }

    if let Err(e) = session.insert(SESSION_USER_EMAIL, &email).await {
        error!("Error creating session: {e}");

        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error creating session".to_string(),
        )
            .into_response();
    }

    debug!("Login successful");

    Redirect::to("/profile").into_response()
}

async fn get_password_hash(pool: &PgPool, email: &str) -> Result<Option<String>, sqlx::Error> {
    let query = "SELECT password_hash FROM users WHERE email = $1";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(email)
        .fetch_optional(pool)
        .instrument(span)
        .await?;

    Ok(row.map(|row| row.get("password_hash")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use sqlx::postgres::PgPoolOptions;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_email(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        format!("{prefix}{nanos}@example.com")
    }

    async fn test_pool() -> Result<Option<PgPool>> {
        // Skipped unless a test database is provided
        let Ok(dsn) = std::env::var("TEAMSWIPE_TEST_DSN") else {
            return Ok(None);
        };

        let pool = PgPoolOptions::new().max_connections(5).connect(&dsn).await?;

        sqlx::query(crate::teamswipe::SCHEMA_SQL)
            .execute(&pool)
            .await?;

        Ok(Some(pool))
    }

    #[test]
    fn test_verify_against_stored_hash() {
        let password_hash = bcrypt::hash("secret123", 4).unwrap();
        assert!(bcrypt::verify("secret123", &password_hash).unwrap());
        assert!(!bcrypt::verify("wrongpass", &password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_get_password_hash_roundtrip() -> Result<()> {
        let Some(pool) = test_pool().await? else {
            return Ok(());
        };

        let email = unique_email("login");
        let password_hash = bcrypt::hash("secret123", 4)?;

        sqlx::query("INSERT INTO users (email, password_hash) VALUES ($1, $2)")
            .bind(&email)
            .bind(&password_hash)
            .execute(&pool)
            .await?;

        let stored = get_password_hash(&pool, &email).await?;
        assert_eq!(stored.as_deref(), Some(password_hash.as_str()));

        let missing = get_password_hash(&pool, &unique_email("ghost")).await?;
        assert!(missing.is_none());

        Ok(())
    }
}
