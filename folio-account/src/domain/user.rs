use serde::{Deserialize, Serialize};

/// Editorial role attached to a user record.
///
/// Informational only: nothing in the workspace enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Contributor,
}

/// The authenticated user record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
}
