use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::AppError;

const MAX_TITLE_CHARS: usize = 256;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub excerpt: String,
    /// Markdown source, rendered by the client.
    pub content: String,
    pub category: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub publish_date: Option<DateTime<Utc>>,
    pub likes: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Date used for listing order: the publish date when set, otherwise the
    /// creation date.
    pub fn effective_date(&self) -> DateTime<Utc> {
        self.publish_date.unwrap_or(self.created_at)
    }

    /// Shallow merge of the fields present in `patch`. Does not touch
    /// `updated_at`; the store stamps it.
    pub fn apply(&mut self, patch: PostPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(excerpt) = patch.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(featured_image) = patch.featured_image {
            self.featured_image = non_empty(featured_image);
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(publish_date) = patch.publish_date {
            self.publish_date = publish_date;
        }
    }
}

/// Body of `POST /api/posts`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub title: String,
    pub excerpt: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
}

impl NewPost {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_title(&self.title)?;
        validate_required("content", &self.content)
    }

    /// Builds the stored entity with the defaults applied to unset fields.
    pub fn into_post(self, id: u64, now: DateTime<Utc>) -> Post {
        Post {
            id,
            title: self.title,
            excerpt: self.excerpt,
            content: self.content,
            category: self.category,
            featured_image: non_empty(self.featured_image),
            status: self.status.unwrap_or_default(),
            publish_date: self.publish_date,
            likes: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Body of `PUT /api/posts/:id`. A field left out keeps its stored value;
/// `featuredImage` and `publishDate` may be set to `null` explicitly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub featured_image: Option<Option<String>>,
    pub status: Option<PostStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub publish_date: Option<Option<DateTime<Utc>>>,
}

impl PostPatch {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(content) = &self.content {
            validate_required("content", content)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u64,
    pub post_id: Option<u64>,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/posts/:id/comments`. The route overrides `post_id`
/// with the id from the path.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    #[serde(default)]
    pub post_id: Option<u64>,
    pub author: String,
    pub content: String,
}

impl NewComment {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required("author", &self.author)?;
        validate_required("content", &self.content)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_required("username", &self.username)?;
        validate_required("name", &self.name)
    }
}

/// Distinguishes a missing field (`None`) from an explicit `null`
/// (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::Validation(format!(
            "Title must be 1-{MAX_TITLE_CHARS} characters"
        )));
    }
    Ok(())
}

fn validate_required(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}
