//! Per-request caller identity supplied by the identity provider.

use super::{Role, User, UserId};
use thiserror::Error;

/// Resolved identity of the caller performing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    id: UserId,
    role: Role,
}

impl Caller {
    /// Creates a caller identity.
    #[must_use]
    pub const fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the caller's access role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns `true` for administrative callers.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self::new(user.id(), user.role())
    }
}

/// Request identity context handed to every core operation.
///
/// The surrounding service layer populates this from its credential
/// verification; an anonymous context rejects every operation before any
/// store access happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthContext {
    caller: Option<Caller>,
}

impl AuthContext {
    /// Creates a context for an authenticated caller.
    #[must_use]
    pub const fn authenticated(caller: Caller) -> Self {
        Self {
            caller: Some(caller),
        }
    }

    /// Creates a context with no resolved identity.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { caller: None }
    }

    /// Returns the resolved caller.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Unauthorized`] when no identity was
    /// supplied for the request.
    pub const fn caller(&self) -> Result<&Caller, IdentityError> {
        match &self.caller {
            Some(caller) => Ok(caller),
            None => Err(IdentityError::Unauthorized),
        }
    }
}

impl From<Caller> for AuthContext {
    fn from(caller: Caller) -> Self {
        Self::authenticated(caller)
    }
}

/// Errors raised by the identity boundary.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The request carried no resolved caller identity.
    #[error("not authorized to access this resource")]
    Unauthorized,
}
