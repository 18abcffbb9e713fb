use anyhow::{anyhow, Result};
use rand::{rngs::OsRng, RngCore};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use tower_sessions::cookie::Key;

/// Session field holding the authenticated user's email.
pub const SESSION_USER_EMAIL: &str = "user_email";

/// Derive the session cookie signing key from the configured secret.
///
/// The secret is stretched to the 64 bytes of key material the cookie crate
/// requires. Without a secret a random key is generated, invalidating all
/// sessions on restart.
pub fn signing_key(secret: Option<&SecretString>) -> Result<Key> {
    let digest = match secret {
        Some(secret) => Sha512::digest(secret.expose_secret().as_bytes()),
        None => {
            let mut seed = [0u8; 64];
            OsRng.fill_bytes(&mut seed);
            Sha512::digest(seed)
        }
    };

    Key::try_from(digest.as_slice()).map_err(|e| anyhow!("Invalid session key material: {e}"))
}
