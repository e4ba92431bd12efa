use uuid::Uuid;

pub const NAME_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 500;

/// A category row together with its derived link count.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub links_count: i64,
}

pub fn validate_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Category name is required and must not be empty".into());
    }
    if trimmed.len() > NAME_MAX_LEN {
        return Err(format!(
            "Category name must be at most {} characters",
            NAME_MAX_LEN
        ));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), String> {
    if description.len() > DESCRIPTION_MAX_LEN {
        return Err(format!(
            "Category description must be at most {} characters",
            DESCRIPTION_MAX_LEN
        ));
    }
    Ok(())
}
