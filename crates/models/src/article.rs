use sea_orm::entity::prelude::*;

use crate::errors;

/// Upper bound on `title`, in characters. Mirrors the `VARCHAR(250)` column.
pub const TITLE_MAX_LEN: usize = 250;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "article")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub short_description: String,
    pub description: String,
    pub category: String,
    pub source: String,
    #[sea_orm(unique)]
    pub path: String,
    pub published_date: DateTimeUtc,
    pub author: String,
    pub image_url: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Title must be non-blank and at most [`TITLE_MAX_LEN`] characters.
pub fn validate_title(title: &str) -> Result<(), errors::ModelError> {
    if title.trim().is_empty() {
        return Err(errors::ModelError::Validation("title must not be empty".into()));
    }
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(errors::ModelError::Validation(format!(
            "title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_rules() {
        assert!(validate_title("Breaking news").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"a".repeat(TITLE_MAX_LEN)).is_ok());
        assert!(validate_title(&"a".repeat(TITLE_MAX_LEN + 1)).is_err());
        // counted in characters, not bytes
        assert!(validate_title(&"é".repeat(TITLE_MAX_LEN)).is_ok());
    }
}
