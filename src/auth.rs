//! Remote authentication collaborator.
//!
//! The wire protocol belongs to the account service; this crate only needs
//! to log in with captured credentials and read back the identity snapshot
//! that a successful login records.

use async_trait::async_trait;

use crate::error::DialogError;

/// Identity recorded by the last successful login. The `token` is whatever
/// credential the service issued for subsequent requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSnapshot {
    pub username: String,
    pub token: String,
}

/// Client for the remote account service.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Authenticate with the given credentials. On success the client is
    /// expected to hold an [`AuthSnapshot`] until the next login attempt.
    async fn login(&self, username: &str, password: &str) -> Result<(), DialogError>;

    /// Identity snapshot from the last successful login, if any.
    fn snapshot(&self) -> Option<AuthSnapshot>;
}
