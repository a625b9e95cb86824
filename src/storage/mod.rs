//! Blog storage.
//!
//! Handlers only see the repository traits; `MemStorage` is the in-memory
//! implementation that lives for the process lifetime. A durable backend can
//! implement the same traits without changing any caller.
//!
//! "Not found" is reported as `Ok(None)` (or `Ok(false)` for deletes). `Err`
//! is reserved for backend failures, which the in-memory store never produces.

pub mod memory;


use anyhow::Result;
use async_trait::async_trait;

use crate::models::{Comment, NewComment, NewPost, NewUser, Post, PostPatch, User};

pub use memory::{MemStorage, StoreStats};

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, newest effective date (publish date, else creation date)
    /// first. Equal dates keep insertion order.
    async fn all_posts(&self) -> Result<Vec<Post>>;

    async fn post_by_id(&self, id: u64) -> Result<Option<Post>>;

    /// Stores a new post under the next id with `likes = 0`.
    async fn create_post(&self, draft: NewPost) -> Result<Post>;

    /// Merges the fields present in `patch` and refreshes `updated_at`.
    async fn update_post(&self, id: u64, patch: PostPatch) -> Result<Option<Post>>;

    /// Returns whether a post was removed.
    async fn delete_post(&self, id: u64) -> Result<bool>;

    /// Adds exactly one like and refreshes `updated_at`.
    async fn like_post(&self, id: u64) -> Result<Option<Post>>;
}

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Comments attached to `post_id`, newest first.
    async fn comments_by_post_id(&self, post_id: u64) -> Result<Vec<Comment>>;

    async fn create_comment(&self, draft: NewComment) -> Result<Comment>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn user_by_id(&self, id: u64) -> Result<Option<User>>;

    async fn user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn create_user(&self, draft: NewUser) -> Result<User>;

    /// Creates the user unless the username is already taken, as one atomic
    /// step. `None` means taken.
    async fn create_user_if_absent(&self, draft: NewUser) -> Result<Option<User>>;
}

/// The full store a request handler works against.
#[async_trait]
pub trait Storage: PostRepository + CommentRepository + UserRepository {
    async fn stats(&self) -> Result<StoreStats>;
}
