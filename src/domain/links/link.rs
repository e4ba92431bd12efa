use uuid::Uuid;

pub const TITLE_MAX_LEN: usize = 200;
pub const URL_MAX_LEN: usize = 500;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// A bookmark row. `category_name` is joined in by the store for display and
/// is `None` for uncategorized links.
#[derive(Debug, Clone)]
pub struct Link {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub pinned: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

pub fn validate_title(title: &str) -> Result<(), String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err("Link title is required and must not be empty".into());
    }
    if trimmed.len() > TITLE_MAX_LEN {
        return Err(format!("Link title must be at most {} characters", TITLE_MAX_LEN));
    }
    Ok(())
}

/// A URL is acceptable when it parses absolutely and carries both a scheme
/// and a host, e.g. `https://example.com/path`.
pub fn validate_url(raw: &str) -> Result<(), String> {
    if raw.len() > URL_MAX_LEN {
        return Err(format!("Link URL must be at most {} characters", URL_MAX_LEN));
    }
    match url::Url::parse(raw) {
        Ok(parsed) if parsed.has_host() && !parsed.scheme().is_empty() => Ok(()),
        _ => Err("Invalid URL format. Must include scheme (http/https) and domain.".into()),
    }
}

pub fn validate_description(description: &str) -> Result<(), String> {
    if description.len() > DESCRIPTION_MAX_LEN {
        return Err(format!(
            "Link description must be at most {} characters",
            DESCRIPTION_MAX_LEN
        ));
    }
    Ok(())
}
