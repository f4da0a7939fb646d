use std::collections::HashMap;
use std::fmt;
use std::fmt::Display;

use leptos::prelude::*;
use strum_macros::IntoStaticStr;

use postline_utils::constants::{COMMENT_CREATED_MESSAGE, COMMENT_CREATE_FAILED_MESSAGE, COMMENT_DELETED_MESSAGE, COMMENT_DELETE_FAILED_MESSAGE, COMMENT_UPDATED_MESSAGE, COMMENT_UPDATE_FAILED_MESSAGE};

/// Identifies a cached view of remote data that must be re-fetched when stale
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum CacheKey {
    PostComments(i64),
    PostDetail(i64),
    UserPosts,
    HomeFeed,
    ExploreFeed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
pub enum CommentMutation {
    Create,
    Update,
    Delete,
}

/// Version counters of the cached views. Reading a version subscribes to it, so resources keyed on it re-fetch
/// when it is invalidated.
#[derive(Clone, Copy, Debug)]
pub struct QueryCache {
    versions: RwSignal<HashMap<CacheKey, usize>>,
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::PostComments(post_id) => write!(f, "comments/{post_id}"),
            CacheKey::PostDetail(post_id) => write!(f, "post/{post_id}"),
            CacheKey::UserPosts => write!(f, "userPosts"),
            CacheKey::HomeFeed => write!(f, "feed"),
            CacheKey::ExploreFeed => write!(f, "explorePosts"),
        }
    }
}

impl CommentMutation {
    /// Cached views made stale by a successful mutation on a comment of `post_id`
    pub fn invalidated_keys(&self, post_id: i64) -> Vec<CacheKey> {
        match self {
            CommentMutation::Update => vec![CacheKey::PostComments(post_id)],
            CommentMutation::Create | CommentMutation::Delete => vec![
                CacheKey::PostComments(post_id),
                CacheKey::PostDetail(post_id),
                CacheKey::UserPosts,
                CacheKey::HomeFeed,
                CacheKey::ExploreFeed,
            ],
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            CommentMutation::Create => COMMENT_CREATED_MESSAGE,
            CommentMutation::Update => COMMENT_UPDATED_MESSAGE,
            CommentMutation::Delete => COMMENT_DELETED_MESSAGE,
        }
    }

    pub fn failure_message(&self) -> &'static str {
        match self {
            CommentMutation::Create => COMMENT_CREATE_FAILED_MESSAGE,
            CommentMutation::Update => COMMENT_UPDATE_FAILED_MESSAGE,
            CommentMutation::Delete => COMMENT_DELETE_FAILED_MESSAGE,
        }
    }
}

impl QueryCache {
    pub fn new() -> Self {
        QueryCache { versions: RwSignal::new(HashMap::new()) }
    }

    /// Returns the current version of `key`, tracking it in the reactive context
    pub fn version(&self, key: CacheKey) -> usize {
        self.versions.with(|versions| versions.get(&key).copied().unwrap_or_default())
    }

    pub fn invalidate(&self, keys: &[CacheKey]) {
        log::debug!("Invalidate cache keys: {keys:?}");
        self.versions.update(|versions| {
            for key in keys {
                *versions.entry(*key).or_default() += 1;
            }
        });
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use leptos::prelude::*;

    use crate::cache::{CacheKey, CommentMutation, QueryCache};

    #[test]
    fn test_invalidated_keys() {
        let post_id = 7;
        let all_keys = vec![
            CacheKey::PostComments(post_id),
            CacheKey::PostDetail(post_id),
            CacheKey::UserPosts,
            CacheKey::HomeFeed,
            CacheKey::ExploreFeed,
        ];
        assert_eq!(CommentMutation::Create.invalidated_keys(post_id), all_keys);
        assert_eq!(CommentMutation::Delete.invalidated_keys(post_id), all_keys);
        assert_eq!(CommentMutation::Update.invalidated_keys(post_id), vec![CacheKey::PostComments(post_id)]);
    }

    #[test]
    fn test_cache_key_display() {
        assert_eq!(CacheKey::PostComments(1).to_string(), "comments/1");
        assert_eq!(CacheKey::PostDetail(1).to_string(), "post/1");
        assert_eq!(CacheKey::UserPosts.to_string(), "userPosts");
        assert_eq!(CacheKey::HomeFeed.to_string(), "feed");
        assert_eq!(CacheKey::ExploreFeed.to_string(), "explorePosts");
    }

    #[test]
    fn test_mutation_messages() {
        assert_eq!(CommentMutation::Create.success_message(), "Comment added successfully!");
        assert_eq!(CommentMutation::Create.failure_message(), "Failed to add comment. Please try again.");
        assert_eq!(CommentMutation::Update.success_message(), "Comment updated successfully!");
        assert_eq!(CommentMutation::Update.failure_message(), "Failed to update comment. Please try again.");
        assert_eq!(CommentMutation::Delete.success_message(), "Comment deleted successfully!");
        assert_eq!(CommentMutation::Delete.failure_message(), "Failed to delete comment. Please try again.");
    }

    #[test]
    fn test_query_cache_invalidate() {
        let owner = Owner::new();
        owner.set();

        let query_cache = QueryCache::new();
        assert_eq!(query_cache.version(CacheKey::PostComments(1)), 0);

        query_cache.invalidate(&CommentMutation::Update.invalidated_keys(1));
        assert_eq!(query_cache.version(CacheKey::PostComments(1)), 1);
        assert_eq!(query_cache.version(CacheKey::PostComments(2)), 0);
        assert_eq!(query_cache.version(CacheKey::HomeFeed), 0);

        query_cache.invalidate(&CommentMutation::Delete.invalidated_keys(1));
        assert_eq!(query_cache.version(CacheKey::PostComments(1)), 2);
        assert_eq!(query_cache.version(CacheKey::PostDetail(1)), 1);
        assert_eq!(query_cache.version(CacheKey::ExploreFeed), 1);
    }

    #[test]
    fn test_query_cache_version_is_tracked() {
        let owner = Owner::new();
        owner.set();

        let query_cache = QueryCache::new();
        let comments_version = Memo::new(move |_| query_cache.version(CacheKey::PostComments(3)));
        assert_eq!(comments_version.get(), 0);
        query_cache.invalidate(&[CacheKey::PostComments(3)]);
        assert_eq!(comments_version.get(), 1);
    }
}
