use crate::models::{Role, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct Profile {
    pub name: String,
    pub email: String,
    #[schema(example = "staff")]
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

impl From<User> for Profile {
    fn from(user: User) -> Self {
        Self {
            email: user.email.to_owned(),
            name: user.name.to_owned(),
            role: user.role,
            created_at: user.created_at.to_string(),
            updated_at: user.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginInfo {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterInfo {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_carries_the_user_role() {
        let user = User {
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            role: Role::Manager,
            ..Default::default()
        };
        let profile = Profile::from(user);
        assert_eq!(profile.role, Role::Manager);
        assert_eq!(profile.email, "dana@example.com");
    }
}
