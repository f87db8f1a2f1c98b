//! View-ready feed entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prefix of client-generated comment ids awaiting a refetch.
pub const PENDING_COMMENT_PREFIX: &str = "local-";

/// The signed-in user as the feed sees them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub user_id: String,
    pub email: Option<String>,
    /// Already resolved to an absolute URL.
    pub avatar_url: String,
}

/// Who wrote a post or comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    /// Always absolute after normalization.
    pub avatar_url: String,
}

impl AuthorRef {
    pub fn label(&self) -> &str {
        self.email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or("User")
    }
}

/// A like, in whichever encoding the backend used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LikeRef {
    /// Bare user id
    User(String),
    /// Embedded user record
    Embedded {
        id: Option<String>,
        email: Option<String>,
    },
}

impl LikeRef {
    /// Bare ids match on user id; embedded records match on email, or on id
    /// when the record carries one.
    pub fn matches(&self, viewer: &Viewer) -> bool {
        match self {
            LikeRef::User(id) => *id == viewer.user_id,
            LikeRef::Embedded { id, email } => {
                let email_match = matches!(
                    (email.as_deref(), viewer.email.as_deref()),
                    (Some(a), Some(b)) if a == b
                );
                email_match || id.as_deref() == Some(viewer.user_id.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: AuthorRef,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// True for a comment created locally and not yet replaced by a refetch.
    pub fn is_pending(&self) -> bool {
        self.id.starts_with(PENDING_COMMENT_PREFIX)
    }
}

/// A post in the feed.
///
/// `has_liked` is derived from `likes` and can only change through the
/// methods below, so the two never disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub author: AuthorRef,
    pub content: String,
    pub created_at: Option<DateTime<Utc>>,
    pub comments: Vec<Comment>,
    likes: Vec<LikeRef>,
    has_liked: bool,
}

impl Post {
    pub fn new(
        id: impl Into<String>,
        author: AuthorRef,
        content: impl Into<String>,
        created_at: Option<DateTime<Utc>>,
        likes: Vec<LikeRef>,
        comments: Vec<Comment>,
        viewer: &Viewer,
    ) -> Self {
        let mut post = Self {
            id: id.into(),
            author,
            content: content.into(),
            created_at,
            comments,
            likes,
            has_liked: false,
        };
        post.recompute_has_liked(viewer);
        post
    }

    pub fn likes(&self) -> &[LikeRef] {
        &self.likes
    }

    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn has_liked(&self) -> bool {
        self.has_liked
    }

    /// Whether the delete affordance should be offered to `viewer`.
    pub fn can_delete(&self, viewer: &Viewer) -> bool {
        !viewer.user_id.is_empty() && self.author.id.as_deref() == Some(viewer.user_id.as_str())
    }

    /// Adds or removes the viewer's like and returns the new liked state.
    /// Unliking drops every entry matching the viewer; liking always appends
    /// a bare user id, so an embedded like comes back in that encoding.
    pub fn toggle_like(&mut self, viewer: &Viewer) -> bool {
        if self.has_liked {
            self.likes.retain(|like| !like.matches(viewer));
        } else {
            self.likes.push(LikeRef::User(viewer.user_id.clone()));
        }
        self.recompute_has_liked(viewer);
        self.has_liked
    }

    pub fn replace_likes(&mut self, likes: Vec<LikeRef>, viewer: &Viewer) {
        self.likes = likes;
        self.recompute_has_liked(viewer);
    }

    fn recompute_has_liked(&mut self, viewer: &Viewer) {
        self.has_liked = self.likes.iter().any(|like| like.matches(viewer));
    }
}
