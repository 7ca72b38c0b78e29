use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::{Post, dto::PaginatedResponse, errors::ApiError};

/// Fixed page size for every post listing.
pub const PER_PAGE: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum PostAccess {
    NotFound,
    /// Caller is authenticated but not the author.
    Forbidden,
}

impl From<PostAccess> for ApiError {
    fn from(err: PostAccess) -> Self {
        match err {
            PostAccess::NotFound => ApiError::NotFound,
            PostAccess::Forbidden => ApiError::Forbidden,
        }
    }
}

/// Post store: one-to-many from users, author-exclusive mutation.
pub struct PostStore {
    posts: DashMap<Uuid, Post>,
    /// Monotonic insertion counter; keeps feed order strict when two posts
    /// land on the same microsecond.
    seq: AtomicU64,
}

impl PostStore {
    pub fn new() -> Self {
        Self {
            posts: DashMap::new(),
            seq: AtomicU64::new(0),
        }
    }

    pub fn create(&self, author_id: Uuid, title: String, content: String) -> Post {
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            created_at: Utc::now().timestamp_micros(),
            seq: self.seq.fetch_add(1, Ordering::Relaxed),
        };
        self.posts.insert(post.id, post.clone());
        post
    }

    pub fn get(&self, id: Uuid) -> Option<Post> {
        self.posts.get(&id).map(|p| p.clone())
    }

    /// Edit title and content; the creation timestamp is immutable.
    pub fn update(
        &self,
        id: Uuid,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Post, PostAccess> {
        let mut post = self.posts.get_mut(&id).ok_or(PostAccess::NotFound)?;
        if post.author_id != author_id {
            return Err(PostAccess::Forbidden);
        }
        post.title = title;
        post.content = content;
        Ok(post.clone())
    }

    pub fn delete(&self, id: Uuid, author_id: Uuid) -> Result<(), PostAccess> {
        let owner = self
            .posts
            .get(&id)
            .map(|p| p.author_id)
            .ok_or(PostAccess::NotFound)?;
        if owner != author_id {
            return Err(PostAccess::Forbidden);
        }
        self.posts.remove(&id);
        Ok(())
    }

    /// The whole feed, newest first.
    pub fn page(&self, page: usize) -> PaginatedResponse<Post> {
        let posts = self.posts.iter().map(|entry| entry.value().clone()).collect();
        paginate(posts, page)
    }

    /// One author's posts, newest first.
    pub fn page_by_author(&self, author_id: Uuid, page: usize) -> PaginatedResponse<Post> {
        let posts = self
            .posts
            .iter()
            .filter(|entry| entry.value().author_id == author_id)
            .map(|entry| entry.value().clone())
            .collect();
        paginate(posts, page)
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

fn paginate(mut posts: Vec<Post>, page: usize) -> PaginatedResponse<Post> {
    // Sort by creation date (newest first); insertion order breaks ties.
    posts.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.seq.cmp(&a.seq))
    });

    let total = posts.len();
    let start = page.saturating_sub(1) * PER_PAGE;
    let end = (start + PER_PAGE).min(total);

    let data = if start < total {
        posts[start..end].to_vec()
    } else {
        Vec::new()
    };

    PaginatedResponse {
        data,
        page,
        limit: PER_PAGE,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> (PostStore, Uuid) {
        let store = PostStore::new();
        let author = Uuid::new_v4();
        for i in 1..=7 {
            store.create(author, format!("post {}", i), "content".to_string());
        }
        (store, author)
    }

    #[test]
    fn pages_cap_at_five_newest_first() {
        let (store, _) = seeded();

        let first = store.page(1);
        assert_eq!(first.data.len(), PER_PAGE);
        assert_eq!(first.total, 7);
        assert_eq!(first.data[0].title, "post 7");
        assert_eq!(first.data[4].title, "post 3");

        let second = store.page(2);
        assert_eq!(second.data.len(), 2);
        assert_eq!(second.data[1].title, "post 1");

        assert!(store.page(3).data.is_empty());
    }

    #[test]
    fn author_filter_only_returns_their_posts() {
        let (store, author) = seeded();
        let other = Uuid::new_v4();
        store.create(other, "not mine".to_string(), "content".to_string());

        let page = store.page_by_author(author, 1);
        assert_eq!(page.total, 7);
        assert!(page.data.iter().all(|p| p.author_id == author));

        assert_eq!(store.page_by_author(other, 1).total, 1);
    }

    #[test]
    fn update_is_author_only_and_keeps_timestamp() {
        let store = PostStore::new();
        let author = Uuid::new_v4();
        let post = store.create(author, "title".into(), "content".into());

        assert_eq!(
            store.update(post.id, Uuid::new_v4(), "x".into(), "y".into()).unwrap_err(),
            PostAccess::Forbidden
        );
        assert_eq!(
            store.update(Uuid::new_v4(), author, "x".into(), "y".into()).unwrap_err(),
            PostAccess::NotFound
        );

        let updated = store
            .update(post.id, author, "new title".into(), "new content".into())
            .unwrap();
        assert_eq!(updated.title, "new title");
        assert_eq!(updated.created_at, post.created_at);
    }

    #[test]
    fn delete_is_author_only_and_immediate() {
        let store = PostStore::new();
        let author = Uuid::new_v4();
        let post = store.create(author, "title".into(), "content".into());

        assert_eq!(
            store.delete(post.id, Uuid::new_v4()).unwrap_err(),
            PostAccess::Forbidden
        );
        assert!(store.get(post.id).is_some());

        store.delete(post.id, author).unwrap();
        assert!(store.get(post.id).is_none());
        assert_eq!(store.delete(post.id, author), Err(PostAccess::NotFound));
    }
}
