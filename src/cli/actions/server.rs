use crate::cli::{actions::Action, globals::GlobalArgs};
use crate::teamswipe::new;
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            session_secret,
        } => {
            // Reject an unparseable connection string before binding anything
            Url::parse(&dsn).context("Invalid database connection string")?;

            let mut globals = GlobalArgs::new(dsn);

            if let Some(secret) = session_secret {
                globals.set_session_secret(secret);
            }

            new(port, &globals).await?;
        }
    }

    Ok(())
}
