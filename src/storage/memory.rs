use std::collections::BTreeMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;

use super::{CommentRepository, PostRepository, Storage, UserRepository};
use crate::models::{Comment, NewComment, NewPost, NewUser, Post, PostPatch, User};

/// Entity counts, reported by the health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub posts: usize,
    pub comments: usize,
    pub users: usize,
}

struct Tables {
    // BTreeMap keeps id order, which is insertion order since ids only grow.
    posts: BTreeMap<u64, Post>,
    comments: BTreeMap<u64, Comment>,
    users: BTreeMap<u64, User>,
    next_post_id: u64,
    next_comment_id: u64,
    next_user_id: u64,
}

impl Tables {
    fn new() -> Self {
        Self {
            posts: BTreeMap::new(),
            comments: BTreeMap::new(),
            users: BTreeMap::new(),
            next_post_id: 1,
            next_comment_id: 1,
            next_user_id: 1,
        }
    }

    fn insert_user(&mut self, draft: NewUser) -> User {
        let id = self.next_user_id;
        self.next_user_id += 1;

        let user = User {
            id,
            username: draft.username,
            name: draft.name,
            email: draft.email,
            created_at: Utc::now(),
        };
        self.users.insert(id, user.clone());
        tracing::info!("create_user stored user {} ({})", id, user.username);
        user
    }
}

/// In-memory store for posts, comments and users.
///
/// Everything sits behind a single lock so each operation, id allocation
/// included, applies atomically.
pub struct MemStorage {
    tables: RwLock<Tables>,
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
        }
    }

    /// Inserts a post exactly as given, keeping its id and timestamps. Later
    /// ids continue after the highest imported one.
    pub async fn import_post(&self, post: Post) {
        let mut tables = self.tables.write().await;
        tables.next_post_id = tables.next_post_id.max(post.id + 1);
        tables.posts.insert(post.id, post);
    }

    /// Comment counterpart of [`MemStorage::import_post`].
    pub async fn import_comment(&self, comment: Comment) {
        let mut tables = self.tables.write().await;
        tables.next_comment_id = tables.next_comment_id.max(comment.id + 1);
        tables.comments.insert(comment.id, comment);
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn stats(&self) -> Result<StoreStats> {
        let tables = self.tables.read().await;
        Ok(StoreStats {
            posts: tables.posts.len(),
            comments: tables.comments.len(),
            users: tables.users.len(),
        })
    }
}

#[async_trait]
impl PostRepository for MemStorage {
    async fn all_posts(&self) -> Result<Vec<Post>> {
        let tables = self.tables.read().await;
        let mut posts: Vec<Post> = tables.posts.values().cloned().collect();
        // sort_by is stable, so equal dates stay in id order
        posts.sort_by(|a, b| b.effective_date().cmp(&a.effective_date()));
        Ok(posts)
    }

    async fn post_by_id(&self, id: u64) -> Result<Option<Post>> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn create_post(&self, draft: NewPost) -> Result<Post> {
        let mut tables = self.tables.write().await;
        let id = tables.next_post_id;
        tables.next_post_id += 1;

        let post = draft.into_post(id, Utc::now());
        tables.posts.insert(id, post.clone());
        tracing::info!("create_post stored post {}", id);
        Ok(post)
    }

    async fn update_post(&self, id: u64, patch: PostPatch) -> Result<Option<Post>> {
        let mut tables = self.tables.write().await;
        let Some(post) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };

        post.apply(patch);
        post.updated_at = Utc::now();
        tracing::info!("update_post updated post {}", id);
        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: u64) -> Result<bool> {
        let removed = self.tables.write().await.posts.remove(&id).is_some();
        if removed {
            tracing::info!("delete_post removed post {}", id);
        }
        Ok(removed)
    }

    async fn like_post(&self, id: u64) -> Result<Option<Post>> {
        let mut tables = self.tables.write().await;
        let Some(post) = tables.posts.get_mut(&id) else {
            return Ok(None);
        };

        post.likes = post.likes.saturating_add(1);
        post.updated_at = Utc::now();
        tracing::debug!("like_post post {} now has {} likes", id, post.likes);
        Ok(Some(post.clone()))
    }
}

#[async_trait]
impl CommentRepository for MemStorage {
    async fn comments_by_post_id(&self, post_id: u64) -> Result<Vec<Comment>> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|comment| comment.post_id == Some(post_id))
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn create_comment(&self, draft: NewComment) -> Result<Comment> {
        let mut tables = self.tables.write().await;
        let id = tables.next_comment_id;
        tables.next_comment_id += 1;

        let comment = Comment {
            id,
            post_id: draft.post_id,
            author: draft.author,
            content: draft.content,
            created_at: Utc::now(),
        };
        tables.comments.insert(id, comment.clone());
        tracing::info!("create_comment stored comment {} on post {:?}", id, comment.post_id);
        Ok(comment)
    }
}

#[async_trait]
impl UserRepository for MemStorage {
    async fn user_by_id(&self, id: u64) -> Result<Option<User>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, draft: NewUser) -> Result<User> {
        let mut tables = self.tables.write().await;
        Ok(tables.insert_user(draft))
    }

    async fn create_user_if_absent(&self, draft: NewUser) -> Result<Option<User>> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|user| user.username == draft.username) {
            return Ok(None);
        }
        Ok(Some(tables.insert_user(draft)))
    }
}
