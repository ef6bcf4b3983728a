use crate::{
    config::TrustedDeviceConfig,
    secrets::{Secrets, SecretsError},
};
use secrecy::SecretString;

#[derive(Clone)]
pub struct GlobalArgs {
    pub secret: SecretString,
    pub cookie_path: String,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            cookie_path: TrustedDeviceConfig::default().cookie_path().to_string(),
        }
    }

    #[must_use]
    pub fn with_cookie_path(mut self, cookie_path: String) -> Self {
        self.cookie_path = cookie_path;
        self
    }

    /// # Errors
    /// Returns an error if the secret cannot key the hasher.
    pub fn hasher(&self) -> Result<Secrets, SecretsError> {
        Secrets::new(&self.secret)
    }

    #[must_use]
    pub fn config(&self) -> TrustedDeviceConfig {
        TrustedDeviceConfig::new().with_cookie_path(self.cookie_path.clone())
    }
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("secret", &"***")
            .field("cookie_path", &self.cookie_path)
            .finish()
    }
}
