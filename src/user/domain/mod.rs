//! Domain model for users and request identity.

mod identity;
mod ids;
mod user;

pub use identity::{AuthContext, Caller, IdentityError};
pub use ids::UserId;
pub use user::{ParseRoleError, Role, User};
