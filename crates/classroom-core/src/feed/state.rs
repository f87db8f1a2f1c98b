//! Feed state and its update function.
//!
//! All feed mutations go through [`FeedState::apply`]. Asynchronous work
//! (requests) lives outside; it feeds results back in as actions tagged with
//! the generation they were started under, so late answers from a superseded
//! fetch are dropped instead of overwriting newer state.

use super::model::{Comment, LikeRef, Post};
use super::normalize::NormalizeContext;
use super::record::PostRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Screen-level load state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FeedPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

/// How to undo an optimistic mutation on a single post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Undo {
    /// Restore the likes the post had before the toggle.
    Likes(Vec<LikeRef>),
    /// Drop the locally appended comment.
    Comment(String),
}

/// Handed out for every optimistic mutation; give it back as
/// [`FeedAction::Revert`] if the server rejects the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimisticTicket {
    pub generation: u64,
    pub post_id: String,
    pub undo: Undo,
}

#[derive(Debug, Clone)]
pub enum FeedAction {
    FetchStarted,
    FetchSucceeded {
        generation: u64,
        records: Vec<PostRecord>,
        fetched_at: DateTime<Utc>,
    },
    FetchFailed {
        generation: u64,
        message: String,
    },
    ToggleLike {
        post_id: String,
    },
    AppendComment {
        post_id: String,
        comment: Comment,
    },
    PostCreated {
        record: PostRecord,
    },
    PostRemoved {
        post_id: String,
    },
    Revert {
        ticket: OptimisticTicket,
    },
    MarkStale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The action belongs to a generation that a newer fetch replaced.
    Superseded,
    /// The target post is not in the feed.
    UnknownPost,
}

/// What an action did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    Loading { generation: u64 },
    Replaced { count: usize },
    Failed,
    Optimistic(OptimisticTicket),
    Inserted { post_id: String },
    Removed { post_id: String },
    Reverted { post_id: String },
    MarkedStale,
    Ignored(IgnoreReason),
}

/// The feed snapshot owned by the engine: newest post first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    pub phase: FeedPhase,
    pub posts: Vec<Post>,
    pub generation: u64,
    pub stale: bool,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl FeedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, post_id: &str) -> Option<&Post> {
        self.posts.iter().find(|post| post.id == post_id)
    }

    fn post_mut(&mut self, post_id: &str) -> Option<&mut Post> {
        self.posts.iter_mut().find(|post| post.id == post_id)
    }

    pub fn apply(&mut self, action: FeedAction, ctx: &NormalizeContext) -> Applied {
        match action {
            FeedAction::FetchStarted => {
                self.generation += 1;
                self.phase = FeedPhase::Loading;
                Applied::Loading {
                    generation: self.generation,
                }
            }
            FeedAction::FetchSucceeded {
                generation,
                records,
                fetched_at,
            } => {
                if generation != self.generation {
                    return Applied::Ignored(IgnoreReason::Superseded);
                }
                self.posts = records.into_iter().map(|record| ctx.post(record)).collect();
                self.phase = FeedPhase::Ready;
                self.stale = false;
                self.last_fetched_at = Some(fetched_at);
                Applied::Replaced {
                    count: self.posts.len(),
                }
            }
            FeedAction::FetchFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    return Applied::Ignored(IgnoreReason::Superseded);
                }
                self.phase = FeedPhase::Error(message);
                Applied::Failed
            }
            FeedAction::ToggleLike { post_id } => {
                let generation = self.generation;
                let Some(post) = self.post_mut(&post_id) else {
                    return Applied::Ignored(IgnoreReason::UnknownPost);
                };
                let before = post.likes().to_vec();
                post.toggle_like(&ctx.viewer);
                Applied::Optimistic(OptimisticTicket {
                    generation,
                    post_id,
                    undo: Undo::Likes(before),
                })
            }
            FeedAction::AppendComment { post_id, comment } => {
                let generation = self.generation;
                let Some(post) = self.post_mut(&post_id) else {
                    return Applied::Ignored(IgnoreReason::UnknownPost);
                };
                let comment_id = comment.id.clone();
                post.comments.push(comment);
                Applied::Optimistic(OptimisticTicket {
                    generation,
                    post_id,
                    undo: Undo::Comment(comment_id),
                })
            }
            FeedAction::PostCreated { record } => {
                let post = ctx.created_post(record);
                let post_id = post.id.clone();
                self.posts.retain(|existing| existing.id != post_id);
                self.posts.insert(0, post);
                Applied::Inserted { post_id }
            }
            FeedAction::PostRemoved { post_id } => {
                let before = self.posts.len();
                self.posts.retain(|post| post.id != post_id);
                if self.posts.len() == before {
                    Applied::Ignored(IgnoreReason::UnknownPost)
                } else {
                    Applied::Removed { post_id }
                }
            }
            FeedAction::Revert { ticket } => {
                if ticket.generation != self.generation {
                    return Applied::Ignored(IgnoreReason::Superseded);
                }
                let Some(post) = self.post_mut(&ticket.post_id) else {
                    return Applied::Ignored(IgnoreReason::UnknownPost);
                };
                match ticket.undo {
                    Undo::Likes(likes) => post.replace_likes(likes, &ctx.viewer),
                    Undo::Comment(comment_id) => post.comments.retain(|c| c.id != comment_id),
                }
                Applied::Reverted {
                    post_id: ticket.post_id,
                }
            }
            FeedAction::MarkStale => {
                self.stale = true;
                Applied::MarkedStale
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::avatar::AvatarResolver;
    use crate::feed::model::Viewer;
    use crate::feed::record::{AuthorField, AuthorRecord, LikeEntry};

    fn ctx() -> NormalizeContext {
        NormalizeContext::new(
            Viewer {
                user_id: "u1".into(),
                email: Some("u1@kkumail.com".into()),
                avatar_url: "https://img/u1.png".into(),
            },
            AvatarResolver::new("https://cis.kku.ac.th", "https://img/default.png"),
        )
    }

    fn record(id: &str, content: &str) -> PostRecord {
        PostRecord {
            id: id.into(),
            content: Some(content.into()),
            created_by: Some(AuthorField::Embedded(AuthorRecord {
                id: Some("u2".into()),
                email: Some("u2@kkumail.com".into()),
                ..Default::default()
            })),
            like: Some(vec![]),
            comment: Some(vec![]),
            ..Default::default()
        }
    }

    fn loaded(records: Vec<PostRecord>) -> FeedState {
        let mut state = FeedState::new();
        let ctx = ctx();
        let Applied::Loading { generation } = state.apply(FeedAction::FetchStarted, &ctx) else {
            panic!("expected loading");
        };
        state.apply(
            FeedAction::FetchSucceeded {
                generation,
                records,
                fetched_at: Utc::now(),
            },
            &ctx,
        );
        state
    }

    #[test]
    fn test_fetch_lifecycle() {
        let ctx = ctx();
        let mut state = FeedState::new();
        assert_eq!(state.phase, FeedPhase::Idle);

        let applied = state.apply(FeedAction::FetchStarted, &ctx);
        assert_eq!(applied, Applied::Loading { generation: 1 });
        assert_eq!(state.phase, FeedPhase::Loading);

        let applied = state.apply(
            FeedAction::FetchSucceeded {
                generation: 1,
                records: vec![record("p2", "newer"), record("p1", "older")],
                fetched_at: Utc::now(),
            },
            &ctx,
        );
        assert_eq!(applied, Applied::Replaced { count: 2 });
        assert_eq!(state.phase, FeedPhase::Ready);
        assert_eq!(state.posts[0].id, "p2");
        assert!(state.last_fetched_at.is_some());
    }

    #[test]
    fn test_fetch_failure_sets_error() {
        let ctx = ctx();
        let mut state = FeedState::new();
        state.apply(FeedAction::FetchStarted, &ctx);
        let applied = state.apply(
            FeedAction::FetchFailed {
                generation: 1,
                message: "offline".into(),
            },
            &ctx,
        );
        assert_eq!(applied, Applied::Failed);
        assert_eq!(state.phase, FeedPhase::Error("offline".into()));
    }

    #[test]
    fn test_late_fetch_result_is_dropped() {
        let ctx = ctx();
        let mut state = FeedState::new();
        state.apply(FeedAction::FetchStarted, &ctx);
        state.apply(FeedAction::FetchStarted, &ctx);

        let late = state.apply(
            FeedAction::FetchSucceeded {
                generation: 1,
                records: vec![record("old", "stale")],
                fetched_at: Utc::now(),
            },
            &ctx,
        );
        assert_eq!(late, Applied::Ignored(IgnoreReason::Superseded));
        assert!(state.posts.is_empty());
        assert_eq!(state.phase, FeedPhase::Loading);
    }

    #[test]
    fn test_refetch_replaces_optimistic_state() {
        let ctx = ctx();
        let mut state = loaded(vec![record("p1", "hi")]);
        state.apply(
            FeedAction::AppendComment {
                post_id: "p1".into(),
                comment: ctx.pending_comment("nice", Utc::now()),
            },
            &ctx,
        );
        assert_eq!(state.posts[0].comments.len(), 1);

        let Applied::Loading { generation } = state.apply(FeedAction::FetchStarted, &ctx) else {
            panic!("expected loading");
        };
        state.apply(
            FeedAction::FetchSucceeded {
                generation,
                records: vec![record("p1", "hi")],
                fetched_at: Utc::now(),
            },
            &ctx,
        );
        assert!(state.posts[0].comments.is_empty());
    }

    #[test]
    fn test_toggle_like_scenario() {
        let ctx = ctx();
        let mut state = loaded(vec![record("p1", "hi")]);

        let applied = state.apply(FeedAction::ToggleLike { post_id: "p1".into() }, &ctx);
        assert!(matches!(applied, Applied::Optimistic(_)));
        let post = state.post("p1").unwrap();
        assert_eq!(post.likes(), &[LikeRef::User("u1".into())]);
        assert!(post.has_liked());

        state.apply(FeedAction::ToggleLike { post_id: "p1".into() }, &ctx);
        let post = state.post("p1").unwrap();
        assert!(post.likes().is_empty());
        assert!(!post.has_liked());
    }

    #[test]
    fn test_toggle_like_unknown_post() {
        let ctx = ctx();
        let mut state = loaded(vec![record("p1", "hi")]);
        let applied = state.apply(FeedAction::ToggleLike { post_id: "nope".into() }, &ctx);
        assert_eq!(applied, Applied::Ignored(IgnoreReason::UnknownPost));
    }

    #[test]
    fn test_revert_like() {
        let ctx = ctx();
        let mut pre = record("p1", "hi");
        pre.like = Some(vec![LikeEntry::Id("u7".into())]);
        let mut state = loaded(vec![pre]);

        let Applied::Optimistic(ticket) =
            state.apply(FeedAction::ToggleLike { post_id: "p1".into() }, &ctx)
        else {
            panic!("expected optimistic ticket");
        };
        assert_eq!(state.post("p1").unwrap().like_count(), 2);

        let applied = state.apply(FeedAction::Revert { ticket }, &ctx);
        assert_eq!(applied, Applied::Reverted { post_id: "p1".into() });
        let post = state.post("p1").unwrap();
        assert_eq!(post.likes(), &[LikeRef::User("u7".into())]);
        assert!(!post.has_liked());
    }

    #[test]
    fn test_append_comment_touches_only_target() {
        let ctx = ctx();
        let mut state = loaded(vec![record("p1", "hi"), record("p0", "other")]);
        let others_before = state.post("p0").unwrap().comments.clone();

        state.apply(
            FeedAction::AppendComment {
                post_id: "p1".into(),
                comment: ctx.pending_comment("nice", Utc::now()),
            },
            &ctx,
        );

        let target = state.post("p1").unwrap();
        assert_eq!(target.comments.len(), 1);
        assert_eq!(target.comments[0].content, "nice");
        assert_eq!(target.comments[0].author.email.as_deref(), Some("u1@kkumail.com"));
        assert_eq!(state.post("p0").unwrap().comments, others_before);
    }

    #[test]
    fn test_revert_comment_removes_only_that_comment() {
        let ctx = ctx();
        let mut state = loaded(vec![record("p1", "hi")]);
        state.apply(
            FeedAction::AppendComment {
                post_id: "p1".into(),
                comment: ctx.pending_comment("first", Utc::now()),
            },
            &ctx,
        );
        let Applied::Optimistic(ticket) = state.apply(
            FeedAction::AppendComment {
                post_id: "p1".into(),
                comment: ctx.pending_comment("second", Utc::now()),
            },
            &ctx,
        ) else {
            panic!("expected optimistic ticket");
        };

        state.apply(FeedAction::Revert { ticket }, &ctx);
        let comments = &state.post("p1").unwrap().comments;
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].content, "first");
    }

    #[test]
    fn test_revert_after_refetch_is_ignored() {
        let ctx = ctx();
        let mut state = loaded(vec![record("p1", "hi")]);
        let Applied::Optimistic(ticket) =
            state.apply(FeedAction::ToggleLike { post_id: "p1".into() }, &ctx)
        else {
            panic!("expected optimistic ticket");
        };

        let Applied::Loading { generation } = state.apply(FeedAction::FetchStarted, &ctx) else {
            panic!("expected loading");
        };
        let mut server = record("p1", "hi");
        server.like = Some(vec![LikeEntry::Id("u1".into())]);
        state.apply(
            FeedAction::FetchSucceeded {
                generation,
                records: vec![server],
                fetched_at: Utc::now(),
            },
            &ctx,
        );

        let applied = state.apply(FeedAction::Revert { ticket }, &ctx);
        assert_eq!(applied, Applied::Ignored(IgnoreReason::Superseded));
        assert!(state.post("p1").unwrap().has_liked());
    }

    #[test]
    fn test_post_created_goes_to_head() {
        let ctx = ctx();
        let mut state = loaded(vec![record("p1", "hi")]);
        let applied = state.apply(
            FeedAction::PostCreated {
                record: record("p2", "hello"),
            },
            &ctx,
        );
        assert_eq!(applied, Applied::Inserted { post_id: "p2".into() });
        assert_eq!(state.posts.len(), 2);
        assert_eq!(state.posts[0].id, "p2");
        assert_eq!(state.posts[0].content, "hello");
        assert!(state.posts[0].likes().is_empty());
        assert!(state.posts[0].comments.is_empty());
        assert_eq!(state.posts[1].id, "p1");
    }

    #[test]
    fn test_post_removed() {
        let ctx = ctx();
        let mut state = loaded(vec![record("p2", "b"), record("p1", "a")]);
        let applied = state.apply(FeedAction::PostRemoved { post_id: "p2".into() }, &ctx);
        assert_eq!(applied, Applied::Removed { post_id: "p2".into() });
        assert_eq!(state.posts.len(), 1);
        assert_eq!(state.posts[0].id, "p1");

        let missing = state.apply(FeedAction::PostRemoved { post_id: "p2".into() }, &ctx);
        assert_eq!(missing, Applied::Ignored(IgnoreReason::UnknownPost));
    }

    #[test]
    fn test_mark_stale_cleared_by_fetch() {
        let ctx = ctx();
        let mut state = loaded(vec![]);
        state.apply(FeedAction::MarkStale, &ctx);
        assert!(state.stale);

        let Applied::Loading { generation } = state.apply(FeedAction::FetchStarted, &ctx) else {
            panic!("expected loading");
        };
        state.apply(
            FeedAction::FetchSucceeded {
                generation,
                records: vec![],
                fetched_at: Utc::now(),
            },
            &ctx,
        );
        assert!(!state.stale);
    }
}
