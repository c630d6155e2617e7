//! Dashboard loading and account deletion.

use std::fmt;

use futures_util::future::try_join;
use prom_core::dashboard::DELETE_FAILED_MESSAGE;
use prom_core::{AuthContext, ConfirmationMismatch, DashboardSummary, DeletionGuard, Session};

use crate::client::ApiClient;
use crate::error::{ApiError, Result};

/// Fetch matches and stats concurrently. Either failing fails the load.
pub async fn load_summary(client: &ApiClient, auth: &AuthContext) -> Result<DashboardSummary> {
    let (matches, stats) = try_join(
        client.matches(auth.user_id()),
        client.stats(auth.user_id()),
    )
    .await?;
    Ok(DashboardSummary { matches, stats })
}

#[derive(Debug)]
pub enum DeleteError {
    Unconfirmed(ConfirmationMismatch),
    NotSignedIn,
    Api(ApiError),
}

impl DeleteError {
    /// What to tell the user: the backend's own detail when it sent one.
    pub fn notice(&self) -> String {
        match self {
            DeleteError::Unconfirmed(e) => e.to_string(),
            DeleteError::NotSignedIn => "Please sign in first".to_string(),
            DeleteError::Api(e) => e
                .detail()
                .map(str::to_string)
                .unwrap_or_else(|| DELETE_FAILED_MESSAGE.to_string()),
        }
    }
}

impl fmt::Display for DeleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteError::Unconfirmed(e) => write!(f, "{e}"),
            DeleteError::NotSignedIn => write!(f, "not signed in"),
            DeleteError::Api(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DeleteError {}

impl From<ApiError> for DeleteError {
    fn from(e: ApiError) -> Self {
        DeleteError::Api(e)
    }
}

impl From<ConfirmationMismatch> for DeleteError {
    fn from(e: ConfirmationMismatch) -> Self {
        DeleteError::Unconfirmed(e)
    }
}

/// Delete the signed-in account once the guard is armed, then sign out.
///
/// Nothing is sent unless the confirmation matches. On a backend failure
/// the session stays signed in.
pub async fn delete_account(
    client: &ApiClient,
    guard: &DeletionGuard,
    session: &mut Session,
) -> std::result::Result<AuthContext, DeleteError> {
    guard.confirm()?;
    let auth = session.auth().ok_or(DeleteError::NotSignedIn)?;
    client.delete_account(auth).await?;
    session.sign_out().ok_or(DeleteError::NotSignedIn)
}
