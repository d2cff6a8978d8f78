/// Identity of the caller, decoded from a verified bearer token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserContext {
    pub username: String,
    pub is_admin: bool,
}

impl UserContext {
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            username: username.into(),
            is_admin,
        }
    }

    /// Admins may act on any user; everyone else only on themselves
    pub fn can_act_as(&self, username: &str) -> bool {
        self.is_admin || self.username == username
    }
}

/// Authorization error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthorizationError {
    #[error("Unauthorized")]
    AuthenticationRequired,

    #[error("Unauthorized")]
    AdminRequired,

    #[error("Unauthorized")]
    NotCurrentUser,
}

/// Require any authenticated caller
pub fn require_user(user: Option<&UserContext>) -> Result<&UserContext, AuthorizationError> {
    user.ok_or(AuthorizationError::AuthenticationRequired)
}

/// Require an authenticated admin
pub fn require_admin(user: Option<&UserContext>) -> Result<&UserContext, AuthorizationError> {
    let user = require_user(user)?;
    if user.is_admin {
        Ok(user)
    } else {
        Err(AuthorizationError::AdminRequired)
    }
}

/// Require an admin or the user named by `username`
pub fn require_current_or_admin<'a>(
    user: Option<&'a UserContext>,
    username: &str,
) -> Result<&'a UserContext, AuthorizationError> {
    let user = require_user(user)?;
    if user.can_act_as(username) {
        Ok(user)
    } else {
        Err(AuthorizationError::NotCurrentUser)
    }
}
