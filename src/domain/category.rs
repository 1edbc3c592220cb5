use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub color: String, // Hex display color, e.g. "#6366F1"
    pub icon: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateCategoryInput {
    pub name: String,
    pub color: String,
    pub icon: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CreateCategoryInput {
    pub fn new(name: impl Into<String>, color: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            icon: icon.into(),
        }
    }
}

impl CategoryUpdate {
    pub fn apply(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name = name.clone();
        }
        if let Some(color) = &self.color {
            category.color = color.clone();
        }
        if let Some(icon) = &self.icon {
            category.icon = icon.clone();
        }
    }
}

impl Category {
    pub fn new(user_id: String, input: CreateCategoryInput) -> Self {
        Self::from_input(Uuid::new_v4().to_string(), user_id, input, Utc::now())
    }

    pub fn from_input(
        id: String,
        user_id: String,
        input: CreateCategoryInput,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            name: input.name,
            color: input.color,
            icon: input.icon,
            created_at: now,
        }
    }
}
