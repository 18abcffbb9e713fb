use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub dsn: String,
    pub session_secret: Option<SecretString>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(dsn: String) -> Self {
        Self {
            dsn,
            session_secret: None,
        }
    }

    pub fn set_session_secret(&mut self, secret: SecretString) {
        self.session_secret = Some(secret);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let dsn = "postgres://localhost:5432/teamswipe".to_string();
        let args = GlobalArgs::new(dsn);
        assert_eq!(args.dsn, "postgres://localhost:5432/teamswipe");
        assert!(args.session_secret.is_none());
    }

    #[test]
    fn test_set_session_secret() {
        let mut args = GlobalArgs::new("postgres://localhost:5432/teamswipe".to_string());
        args.set_session_secret(SecretString::from("keep it secret".to_string()));
        assert_eq!(
            args.session_secret
                .as_ref()
                .map(|secret| secret.expose_secret()),
            Some("keep it secret")
        );
    }
}
