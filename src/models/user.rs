use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Access level attached to every user account. Stored in PostgreSQL as the
/// `user_role` enum type.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Staff,
}

impl Role {
    /// Whether this role is allowed to mutate catalog and order data.
    /// Read-only requests are never gated on a role.
    pub fn can_manage(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager)
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_is_the_default_role() {
        assert_eq!(Role::default(), Role::Staff);
        assert_eq!(User::default().role, Role::Staff);
    }

    #[test]
    fn only_admin_and_manager_can_manage() {
        assert!(Role::Admin.can_manage());
        assert!(Role::Manager.can_manage());
        assert!(!Role::Staff.can_manage());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"owner\"").is_err());
    }
}
