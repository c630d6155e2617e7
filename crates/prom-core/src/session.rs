//! Signed-in identity, passed explicitly to every component that talks to
//! the backend.

/// Identity of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    user_id: String,
}

impl AuthContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Value for the `Authorization` header on identity-bearing requests.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.user_id)
    }
}

/// Holder for the auth context: populated at sign-in, cleared at sign-out.
#[derive(Debug, Default)]
pub struct Session {
    auth: Option<AuthContext>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` for blank ids.
    pub fn sign_in(&mut self, user_id: &str) -> Option<&AuthContext> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return None;
        }
        self.auth = Some(AuthContext::new(user_id));
        self.auth.as_ref()
    }

    pub fn sign_out(&mut self) -> Option<AuthContext> {
        self.auth.take()
    }

    pub fn auth(&self) -> Option<&AuthContext> {
        self.auth.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.auth.is_some()
    }
}
