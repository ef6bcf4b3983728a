//! Cookie scoping for trusted-device issuers.

use crate::{
    secrets::IdentityHasher,
    twofactor::{TrustedDeviceToken, UserIdentity},
};

const DEFAULT_COOKIE_PATH: &str = "/";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrustedDeviceConfig {
    cookie_path: String,
}

impl Default for TrustedDeviceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustedDeviceConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cookie_path: DEFAULT_COOKIE_PATH.to_string(),
        }
    }

    /// Scope cookies to the application's base path; an empty path falls back to `/`.
    #[must_use]
    pub fn with_cookie_path(mut self, path: String) -> Self {
        let path = path.trim();
        self.cookie_path = if path.is_empty() {
            DEFAULT_COOKIE_PATH.to_string()
        } else {
            path.to_string()
        };
        self
    }

    #[must_use]
    pub fn cookie_path(&self) -> &str {
        &self.cookie_path
    }

    /// Bind `token` to `user` under this configuration's cookie path.
    ///
    /// # Errors
    /// Returns the hasher's error unchanged.
    pub fn issue<H, U>(
        &self,
        user: &U,
        token: impl Into<String>,
        hasher: H,
    ) -> Result<TrustedDeviceToken<H>, H::Error>
    where
        H: IdentityHasher,
        U: UserIdentity + ?Sized,
    {
        TrustedDeviceToken::new(user, token, hasher, self.cookie_path.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twofactor::test_support::RecordingHasher;

    #[test]
    fn default_path_is_root() {
        assert_eq!(TrustedDeviceConfig::default().cookie_path(), "/");
    }

    #[test]
    fn with_cookie_path_trims_and_falls_back() {
        let config = TrustedDeviceConfig::new().with_cookie_path(" /extract ".to_string());
        assert_eq!(config.cookie_path(), "/extract");

        let config = config.with_cookie_path("   ".to_string());
        assert_eq!(config.cookie_path(), "/");
    }

    #[test]
    fn issue_uses_configured_path() {
        let hasher = RecordingHasher::default();
        let config = TrustedDeviceConfig::new().with_cookie_path("/extract-dev".to_string());

        let cookie = config
            .issue("testUser", "token", &hasher)
            .map(|token| token.to_structured_cookie(false));

        assert_eq!(
            cookie.as_ref().map(|cookie| cookie.path.as_str()),
            Ok("/extract-dev")
        );
        assert_eq!(hasher.hash_calls.borrow().len(), 1);
    }
}
