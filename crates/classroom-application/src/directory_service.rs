//! Profile and class roster lookups.

use classroom_core::api::ClassroomApi;
use classroom_core::avatar::AvatarResolver;
use classroom_core::user::{MemberRecord, UserRecord};
use classroom_core::Result;
use std::sync::Arc;

/// A fetched roster together with the enrollment year it was fetched for.
#[derive(Debug, Clone, PartialEq)]
pub struct Roster {
    pub year: u32,
    pub members: Vec<MemberRecord>,
}

impl Roster {
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

pub struct DirectoryService {
    api: Arc<dyn ClassroomApi>,
    avatars: AvatarResolver,
    default_year: u32,
}

impl DirectoryService {
    pub fn new(api: Arc<dyn ClassroomApi>, avatars: AvatarResolver, default_year: u32) -> Self {
        Self {
            api,
            avatars,
            default_year,
        }
    }

    pub fn avatars(&self) -> &AvatarResolver {
        &self.avatars
    }

    /// The signed-in user's profile; `None` when the backend returned none.
    pub async fn profile(&self) -> Result<Option<UserRecord>> {
        self.api.fetch_profile().await
    }

    /// Members of the given enrollment year, or of the configured default.
    pub async fn roster(&self, year: Option<u32>) -> Result<Roster> {
        let year = year.unwrap_or(self.default_year);
        let members = self.api.fetch_roster(year).await?;
        tracing::debug!(
            "[DirectoryService] Roster {} has {} members",
            year,
            members.len()
        );
        Ok(Roster { year, members })
    }
}
