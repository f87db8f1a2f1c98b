//! FeedService - the asynchronous half of the feed engine.
//!
//! Every state change goes through [`FeedState::apply`] under a short write
//! lock. The lock is never held across a request: fetches are tagged with the
//! generation they started under, optimistic mutations hand back a ticket, and
//! both are fed back into the reducer once the request settles.

use chrono::Utc;
use classroom_core::api::ClassroomApi;
use classroom_core::feed::{
    Applied, Comment, FeedAction, FeedState, NormalizeContext, OptimisticTicket, Post,
    RefreshPolicy, Viewer,
};
use classroom_core::{ClassroomError, Result};
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct FeedService {
    api: Arc<dyn ClassroomApi>,
    ctx: NormalizeContext,
    policy: RefreshPolicy,
    state: RwLock<FeedState>,
}

impl FeedService {
    pub fn new(api: Arc<dyn ClassroomApi>, ctx: NormalizeContext) -> Self {
        Self {
            api,
            ctx,
            policy: RefreshPolicy::default(),
            state: RwLock::new(FeedState::new()),
        }
    }

    pub fn with_policy(mut self, policy: RefreshPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn viewer(&self) -> &Viewer {
        &self.ctx.viewer
    }

    /// A copy of the current feed for rendering.
    pub async fn snapshot(&self) -> FeedState {
        self.state.read().await.clone()
    }

    async fn apply(&self, action: FeedAction) -> Applied {
        self.state.write().await.apply(action, &self.ctx)
    }

    /// Fetches the feed and replaces the local state with it.
    ///
    /// Returns the number of posts now in the feed. When a newer refresh
    /// started while this one was in flight, its result is dropped and the
    /// newer state is kept.
    pub async fn refresh(&self) -> Result<usize> {
        let Applied::Loading { generation } = self.apply(FeedAction::FetchStarted).await else {
            return Err(ClassroomError::internal("fetch did not enter loading state"));
        };
        tracing::debug!("[FeedService] Fetching feed (generation {})", generation);

        match self.api.fetch_feed().await {
            Ok(records) => {
                let applied = self
                    .apply(FeedAction::FetchSucceeded {
                        generation,
                        records,
                        fetched_at: Utc::now(),
                    })
                    .await;
                match applied {
                    Applied::Replaced { count } => {
                        tracing::info!("[FeedService] Feed replaced with {} posts", count);
                        Ok(count)
                    }
                    other => {
                        tracing::debug!(
                            "[FeedService] Fetch generation {} dropped: {:?}",
                            generation,
                            other
                        );
                        Ok(self.state.read().await.posts.len())
                    }
                }
            }
            Err(e) => {
                tracing::warn!("[FeedService] Feed fetch failed: {}", e);
                self.apply(FeedAction::FetchFailed {
                    generation,
                    message: e.to_string(),
                })
                .await;
                Err(e)
            }
        }
    }

    /// Called when the feed view regains focus. Refetches when the refresh
    /// policy says so and reports whether it did.
    pub async fn on_focus(&self) -> Result<bool> {
        let needs_refresh = {
            let state = self.state.read().await;
            self.policy.needs_refresh(&state, Utc::now())
        };
        if !needs_refresh {
            return Ok(false);
        }
        self.refresh().await?;
        Ok(true)
    }

    /// Forces the next focus to refetch regardless of age.
    pub async fn mark_stale(&self) {
        self.apply(FeedAction::MarkStale).await;
    }

    /// Toggles the viewer's like on a post.
    ///
    /// The local post flips immediately; the matching like or unlike call is
    /// sent afterwards and the flip is reverted if it fails. Returns the new
    /// liked state.
    pub async fn toggle_like(&self, post_id: &str) -> Result<bool> {
        let (ticket, liked) = {
            let mut state = self.state.write().await;
            let applied = state.apply(
                FeedAction::ToggleLike {
                    post_id: post_id.to_string(),
                },
                &self.ctx,
            );
            let Applied::Optimistic(ticket) = applied else {
                return Err(ClassroomError::not_found("Post", post_id));
            };
            let liked = state.post(post_id).is_some_and(Post::has_liked);
            (ticket, liked)
        };

        let result = if liked {
            self.api.like(post_id).await
        } else {
            self.api.unlike(post_id).await
        };

        if let Err(e) = result {
            self.revert(ticket, &e).await;
            return Err(e);
        }
        Ok(liked)
    }

    /// Appends a comment authored by the viewer.
    ///
    /// The comment shows up at once under a `local-` placeholder id and is
    /// removed again if the server rejects it. The next refresh replaces it
    /// with the server's copy.
    pub async fn add_comment(&self, post_id: &str, content: &str) -> Result<Comment> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ClassroomError::invalid_input("Comment must not be empty"));
        }

        let comment = self.ctx.pending_comment(content, Utc::now());
        let applied = self
            .apply(FeedAction::AppendComment {
                post_id: post_id.to_string(),
                comment: comment.clone(),
            })
            .await;
        let Applied::Optimistic(ticket) = applied else {
            return Err(ClassroomError::not_found("Post", post_id));
        };

        if let Err(e) = self.api.comment(post_id, content).await {
            self.revert(ticket, &e).await;
            return Err(e);
        }
        Ok(comment)
    }

    /// Creates a post and puts it at the head of the feed once the server
    /// has confirmed it.
    pub async fn create_post(&self, content: &str) -> Result<Post> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ClassroomError::invalid_input("Post must not be empty"));
        }

        let record = self.api.create_post(content).await?;
        let mut state = self.state.write().await;
        let Applied::Inserted { post_id } = state.apply(FeedAction::PostCreated { record }, &self.ctx)
        else {
            return Err(ClassroomError::internal("created post was not inserted"));
        };
        tracing::info!("[FeedService] Created post {}", post_id);
        state
            .post(&post_id)
            .cloned()
            .ok_or_else(|| ClassroomError::internal("created post missing from feed"))
    }

    /// Deletes a post authored by the viewer.
    ///
    /// The delete request goes out first; the post leaves the feed only after
    /// the server accepted it.
    pub async fn delete_post(&self, post_id: &str) -> Result<()> {
        {
            let state = self.state.read().await;
            let post = state
                .post(post_id)
                .ok_or_else(|| ClassroomError::not_found("Post", post_id))?;
            if !post.can_delete(&self.ctx.viewer) {
                return Err(ClassroomError::not_permitted(
                    "Only the author can delete a post",
                ));
            }
        }

        self.api.delete_post(post_id).await?;
        self.apply(FeedAction::PostRemoved {
            post_id: post_id.to_string(),
        })
        .await;
        tracing::info!("[FeedService] Deleted post {}", post_id);
        Ok(())
    }

    async fn revert(&self, ticket: OptimisticTicket, cause: &ClassroomError) {
        let post_id = ticket.post_id.clone();
        let applied = self.apply(FeedAction::Revert { ticket }).await;
        tracing::warn!(
            "[FeedService] Server rejected change to post {}: {} ({:?})",
            post_id,
            cause,
            applied
        );
    }
}
