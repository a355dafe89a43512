use crate::models::Category;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub is_active: bool,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            is_active: category.is_active,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPage {
    pub count: i64,
    pub next: Option<i64>,
    pub previous: Option<i64>,
    pub results: Vec<CategoryResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_category_accepts_a_minimal_payload() {
        let body: NewCategory =
            serde_json::from_str(r#"{"name": "Appetizers", "description": "Small dishes"}"#)
                .unwrap();
        assert_eq!(body.name, "Appetizers");
        assert_eq!(body.is_active, None);
    }

    #[test]
    fn response_mirrors_the_row() {
        let response = CategoryResponse::from(Category {
            id: 3,
            name: "Beverages".to_string(),
            description: "Drinks and juices".to_string(),
            is_active: true,
        });
        assert_eq!(response.id, 3);
        assert!(response.is_active);
    }
}
