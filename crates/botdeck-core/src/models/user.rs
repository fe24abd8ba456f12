//! Authenticated principal record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a user within the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Manager,
    Operator,
    Viewer,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::SuperAdmin => "super_admin",
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Operator => "operator",
            UserRole::Viewer => "viewer",
        }
    }
}

/// Account status of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            UserStatus::Active => "active",
            UserStatus::Inactive => "inactive",
            UserStatus::Suspended => "suspended",
            UserStatus::Pending => "pending",
        }
    }
}

/// A principal as returned by the auth backend.
///
/// An absent `last_login_at` means the account has never logged in before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: unknown role values are rejected at the wire boundary.
    #[test]
    fn test_unknown_role_fails_deserialization() {
        let json = r#"{
            "id": "u1", "email": "a@b.c", "full_name": "A",
            "role": "wizard", "status": "active",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        assert!(serde_json::from_str::<User>(json).is_err());
    }

    /// Test: user roundtrip keeps the optional last login absent.
    #[test]
    fn test_user_roundtrip_without_last_login() {
        let json = r#"{
            "id": "u1", "email": "a@b.c", "full_name": "A",
            "role": "admin", "status": "active",
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.last_login_at.is_none());

        let out = serde_json::to_string(&user).unwrap();
        assert!(!out.contains("last_login_at"));
    }
}
