use crate::teamswipe::{
    handlers::{is_unique_violation, normalize_email, render_template},
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
use sqlx::PgPool;
use tower_sessions::Session;
use tracing::{debug, error, info_span, Instrument};
use utoipa::ToSchema;

#[derive(Template)]
#[template(path = "register.html")]
struct RegisterTemplate;

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct UserRegister {
    email: String,
    password: String,
}

#[derive(Debug)]
pub(crate) enum RegisterOutcome {
    Created,
    Duplicate,
}

// registration form, no side effects
pub async fn register_form() -> Response {
    render_template(RegisterTemplate)
}

#[utoipa::path(
    post,
    path = "/register",
    request_body(content = UserRegister, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Registration successful, redirects to the profile page"),
        (status = 400, description = "Email already exists"),
    ),
    tag = "register"
)]
pub async fn register(
    pool: Extension<PgPool>,
    session: Session,
    payload: Option<Form<UserRegister>>,
) -> Response {
    let user: UserRegister = match payload {
        Some(Form(payload)) => payload,
        None => return (StatusCode::BAD_REQUEST, "Missing payload".to_string()).into_response(),
    };

    let email = normalize_email(&user.email);

    debug!("registration request for {email}");

    // salt is generated per call and embedded in the hash output
    let password_hash = match bcrypt::hash(&user.password, bcrypt::DEFAULT_COST) {
        Ok(hash) => hash,
        Err(e) => {
            error!("Error hashing password: {e}");

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error hashing password".to_string(),
            )
                .into_response();
        }
    };

    // The primary key arbitrates duplicates, no check-then-insert
    match insert_user(&pool, &email, &password_hash).await {
        Ok(RegisterOutcome::Created) => (),
        Ok(RegisterOutcome::Duplicate) => {
            debug!("Email already exists");

            return (StatusCode::BAD_REQUEST, "Email already exists".to_string()).into_response();
        }
        Err(e) => {
            error!("Error inserting user: {e}");

            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error inserting user".to_string(),
            )
                .into_response();
        }
    }

    // auto-login after signup
    if let Err(e) = session.insert(SESSION_USER_EMAIL, &email).await {
        error!("Error creating session: {e}");

        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Error creating session".to_string(),
        )
            .into_response();
    }

    Redirect::to("/profile").into_response()
}

async fn insert_user(
    pool: &PgPool,
    email: &str,
    password_hash: &str,
) -> Result<RegisterOutcome, sqlx::Error> {
    let query = "INSERT INTO users (email, password_hash) VALUES ($1, $2)";
    let span = info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    match sqlx::query(query)
        .bind(email)
        .bind(password_hash)
        .execute(pool)
        .instrument(span)
        .await
    {
        Ok(_) => Ok(RegisterOutcome::Created),
        Err(e) if is_unique_violation(&e) => Ok(RegisterOutcome::Duplicate),
        Err(e) => Err(e),
    }
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
    fn test_password_hash_salted_per_call() {
        let first = bcrypt::hash("secret123", 4).unwrap();
        let second = bcrypt::hash("secret123", 4).unwrap();
        assert_ne!(first, second);
        assert!(bcrypt::verify("secret123", &first).unwrap());
        assert!(bcrypt::verify("secret123", &second).unwrap());
    }

    #[tokio::test]
    async fn test_insert_user_duplicate() -> Result<()> {
        let Some(pool) = test_pool().await? else {
            return Ok(());
        };

        let email = unique_email("dup");
        let password_hash = bcrypt::hash("secret123", 4)?;

        let first = insert_user(&pool, &email, &password_hash).await?;
        assert!(matches!(first, RegisterOutcome::Created));

        let second = insert_user(&pool, &email, &password_hash).await?;
        assert!(matches!(second, RegisterOutcome::Duplicate));

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_registration_single_winner() -> Result<()> {
        let Some(pool) = test_pool().await? else {
            return Ok(());
        };

        let email = unique_email("race");
        let password_hash = bcrypt::hash("secret123", 4)?;

        let task_one = insert_user(&pool, &email, &password_hash);
        let task_two = insert_user(&pool, &email, &password_hash);

        let (result_one, result_two) = tokio::join!(task_one, task_two);
        let outcomes = [result_one?, result_two?];

        let created = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RegisterOutcome::Created))
            .count();
        let duplicates = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, RegisterOutcome::Duplicate))
            .count();

        assert_eq!(created, 1);
        assert_eq!(duplicates, 1);

        Ok(())
    }
}
