//! In-memory `ClassroomApi` used by the use case tests.

use async_trait::async_trait;
use classroom_core::api::{ClassroomApi, SignIn};
use classroom_core::feed::PostRecord;
use classroom_core::user::{MemberRecord, UserRecord};
use classroom_core::{ClassroomError, Result};
use std::collections::{HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MockClassroomApi {
    pub token: Mutex<Option<String>>,
    pub feed: Mutex<Vec<PostRecord>>,
    /// One-shot feed answers, each delivered after its delay, ahead of `feed`.
    pub scripted_feeds: Mutex<VecDeque<(Duration, Vec<PostRecord>)>>,
    pub roster: Mutex<Vec<MemberRecord>>,
    pub profile: Mutex<Option<UserRecord>>,
    pub sign_in: Mutex<Option<SignIn>>,
    pub created: Mutex<Option<PostRecord>>,
    /// Operation names that fail with a 500.
    pub failing: Mutex<HashSet<&'static str>>,
    /// Every call made, in order, as `name:arg`.
    pub calls: Mutex<Vec<String>>,
}

impl MockClassroomApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(feed: Vec<PostRecord>) -> Self {
        let api = Self::new();
        *api.feed.lock().unwrap() = feed;
        api
    }

    pub fn script_feed(&self, delay: Duration, feed: Vec<PostRecord>) {
        self.scripted_feeds.lock().unwrap().push_back((delay, feed));
    }

    pub fn fail(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, arg: &str) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", operation, arg));
        if self.failing.lock().unwrap().contains(operation) {
            return Err(ClassroomError::status(500, format!("{} failed", operation)));
        }
        Ok(())
    }
}

#[async_trait]
impl ClassroomApi for MockClassroomApi {
    async fn set_bearer_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<SignIn> {
        self.record("sign_in", email)?;
        self.sign_in
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClassroomError::authentication("Invalid email or password"))
    }

    async fn fetch_profile(&self) -> Result<Option<UserRecord>> {
        self.record("fetch_profile", "")?;
        Ok(self.profile.lock().unwrap().clone())
    }

    async fn fetch_roster(&self, year: u32) -> Result<Vec<MemberRecord>> {
        self.record("fetch_roster", &year.to_string())?;
        Ok(self.roster.lock().unwrap().clone())
    }

    async fn fetch_feed(&self) -> Result<Vec<PostRecord>> {
        self.record("fetch_feed", "")?;
        let scripted = self.scripted_feeds.lock().unwrap().pop_front();
        if let Some((delay, feed)) = scripted {
            tokio::time::sleep(delay).await;
            return Ok(feed);
        }
        Ok(self.feed.lock().unwrap().clone())
    }

    async fn create_post(&self, content: &str) -> Result<PostRecord> {
        self.record("create_post", content)?;
        self.created
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ClassroomError::malformed("no status record"))
    }

    async fn delete_post(&self, post_id: &str) -> Result<()> {
        self.record("delete_post", post_id)
    }

    async fn like(&self, post_id: &str) -> Result<()> {
        self.record("like", post_id)
    }

    async fn unlike(&self, post_id: &str) -> Result<()> {
        self.record("unlike", post_id)
    }

    async fn comment(&self, post_id: &str, content: &str) -> Result<()> {
        self.record("comment", &format!("{}:{}", post_id, content))
    }
}
