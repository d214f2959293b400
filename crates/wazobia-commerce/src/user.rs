//! User account type.

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum UserRole {
    /// Back-office administrator.
    Admin,
    /// Regular customer.
    #[default]
    User,
}

/// A user account. Authentication itself is delegated to a hosted
/// provider; this is the store-side record orders and reviews reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address, used for receipts and review requests.
    pub email: String,
    /// Account role.
    pub role: UserRole,
    /// Unix timestamp of creation.
    pub created_at: i64,
}

impl User {
    /// Create a regular user.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::generate(),
            name: name.into(),
            email: email.into(),
            role: UserRole::User,
            created_at: current_timestamp(),
        }
    }

    /// Whether this account may use the admin console.
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
