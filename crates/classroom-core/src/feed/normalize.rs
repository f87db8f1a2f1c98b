//! Turns wire records into view-ready entities.

use super::model::{AuthorRef, Comment, LikeRef, PENDING_COMMENT_PREFIX, Post, Viewer};
use super::record::{AuthorField, CommentRecord, LikeEntry, PostRecord};
use crate::avatar::AvatarResolver;
use crate::session::Session;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Everything normalization needs to know about the current user and backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeContext {
    pub viewer: Viewer,
    pub avatars: AvatarResolver,
}

impl NormalizeContext {
    pub fn new(viewer: Viewer, avatars: AvatarResolver) -> Self {
        Self { viewer, avatars }
    }

    pub fn for_session(session: &Session, avatars: AvatarResolver) -> Self {
        let viewer = Viewer {
            user_id: session.user_id().to_string(),
            email: session.email().map(str::to_string),
            avatar_url: avatars.resolve(session.user.image.as_deref()),
        };
        Self { viewer, avatars }
    }

    /// Normalizes a fetched post: likes decoded in both encodings, liked
    /// state derived, and every avatar resolved.
    pub fn post(&self, record: PostRecord) -> Post {
        let likes = record
            .like
            .unwrap_or_default()
            .into_iter()
            .filter_map(like_ref)
            .collect();
        let comments = record
            .comment
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, comment)| self.comment(&record.id, index, comment))
            .collect();

        Post::new(
            record.id,
            self.author(record.created_by),
            record.content.unwrap_or_default(),
            parse_timestamp(record.created_at.as_deref()),
            likes,
            comments,
            &self.viewer,
        )
    }

    /// Normalizes the response of a successful post creation. A new post
    /// always starts with no likes and no comments.
    pub fn created_post(&self, record: PostRecord) -> Post {
        let mut post = self.post(PostRecord {
            like: None,
            comment: None,
            ..record
        });
        post.replace_likes(Vec::new(), &self.viewer);
        post
    }

    /// A server comment without an id is keyed by its position in the post,
    /// never by the pending prefix.
    pub fn comment(&self, post_id: &str, index: usize, record: CommentRecord) -> Comment {
        Comment {
            id: record.id.unwrap_or_else(|| format!("{}#{}", post_id, index)),
            author: self.author(record.created_by),
            content: record.content.unwrap_or_default(),
            created_at: parse_timestamp(record.created_at.as_deref()),
        }
    }

    /// Synthesizes the optimistic comment appended before the server confirms.
    pub fn pending_comment(&self, content: &str, now: DateTime<Utc>) -> Comment {
        Comment {
            id: format!("{}{}", PENDING_COMMENT_PREFIX, Uuid::new_v4()),
            author: AuthorRef {
                id: Some(self.viewer.user_id.clone()),
                email: self.viewer.email.clone(),
                name: None,
                avatar_url: self.viewer.avatar_url.clone(),
            },
            content: content.to_string(),
            created_at: Some(now),
        }
    }

    fn author(&self, field: Option<AuthorField>) -> AuthorRef {
        let record = field.map(AuthorField::into_record).unwrap_or_default();
        let name = [record.firstname.as_deref(), record.lastname.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        AuthorRef {
            avatar_url: self.avatars.resolve(record.image.as_deref()),
            id: record.id,
            email: record.email,
            name: (!name.is_empty()).then_some(name),
        }
    }
}

fn like_ref(entry: LikeEntry) -> Option<LikeRef> {
    match entry {
        LikeEntry::Id(id) => Some(LikeRef::User(id)),
        LikeEntry::Embedded(record) => Some(LikeRef::Embedded {
            id: record.id,
            email: record.email,
        }),
        LikeEntry::Unknown(value) => {
            tracing::debug!("Ignoring unrecognized like entry: {}", value);
            None
        }
    }
}

fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match DateTime::parse_from_rfc3339(raw) {
        Ok(parsed) => Some(parsed.with_timezone(&Utc)),
        Err(e) => {
            tracing::debug!("Unparseable timestamp '{}': {}", raw, e);
            None
        }
    }
}
