use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize, Serialize, Clone, sqlx::FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}
