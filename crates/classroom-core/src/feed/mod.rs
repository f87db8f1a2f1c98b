//! Status feed domain: wire records, view entities, normalization, and the
//! state update function that every feed mutation goes through.
//!
//! # Module Structure
//!
//! - `record`: Loosely-typed records as the backend sends them
//! - `model`: View-ready `Post`, `Comment`, `AuthorRef`, `LikeRef`, `Viewer`
//! - `normalize`: `NormalizeContext` (liked-state derivation, avatar resolution)
//! - `state`: `FeedState`, `FeedAction` and optimistic tickets
//! - `policy`: `RefreshPolicy`

mod model;
mod normalize;
mod policy;
mod record;
mod state;

pub use model::{AuthorRef, Comment, LikeRef, PENDING_COMMENT_PREFIX, Post, Viewer};
pub use normalize::NormalizeContext;
pub use policy::RefreshPolicy;
pub use record::{AuthorField, AuthorRecord, CommentRecord, LikeEntry, PostRecord};
pub use state::{Applied, FeedAction, FeedPhase, FeedState, IgnoreReason, OptimisticTicket, Undo};
