use serde::{Deserialize, Serialize};

use usermgmt_core::{DomainError, DomainResult, Entity};

/// A blog post. The title is its key; only the content is editable.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Blog {
    pub title: String,
    pub content: String,
}

impl Blog {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Copy the editable fields of `changes` onto this post (content only).
    pub fn apply_update(&mut self, changes: &Blog) {
        self.content = changes.content.clone();
    }
}

impl Entity for Blog {
    type Id = String;

    fn id(&self) -> &String {
        &self.title
    }

    fn kind() -> &'static str {
        "blog"
    }
}

impl core::fmt::Display for Blog {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Title: {}, Content: {}", self.title, self.content)
    }
}

/// Posts present when the service starts.
pub fn seed_blogs() -> Vec<Blog> {
    vec![
        Blog::new("First Blog", "This is the content of the first blog."),
        Blog::new("Second Blog", "This is the content of the second blog."),
    ]
}

/// Validate a candidate post against the posts it must not collide with.
///
/// `existing` must already exclude the post being updated, if any.
pub fn validate_blog(candidate: &Blog, existing: &[Blog]) -> DomainResult<()> {
    if candidate.title.trim().is_empty() || candidate.content.trim().is_empty() {
        return Err(DomainError::validation(
            "Invalid blog data. Ensure Title and Content are provided.",
        ));
    }

    if existing.iter().any(|b| b.title == candidate.title) {
        return Err(DomainError::conflict(format!(
            "A blog with the title '{}' already exists.",
            candidate.title
        )));
    }

    Ok(())
}
