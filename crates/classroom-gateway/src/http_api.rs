//! HttpClassroomApi - REST implementation of `ClassroomApi`.
//!
//! Every request carries the `x-api-key` header; once a token is installed it
//! also carries `Authorization: Bearer <token>`. Nothing is retried.

use crate::envelope::{Envelope, decode_list, decode_one};
use async_trait::async_trait;
use classroom_core::api::{ClassroomApi, SignIn};
use classroom_core::config::ApiConfig;
use classroom_core::feed::PostRecord;
use classroom_core::user::{MemberRecord, UserRecord};
use classroom_core::{ClassroomError, Result};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::RwLock;

#[derive(Debug, Serialize)]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct ContentRequest<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusRef<'a> {
    status_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CommentRequest<'a> {
    content: &'a str,
    status_id: &'a str,
}

/// Talks to the classroom backend over HTTPS.
pub struct HttpClassroomApi {
    client: Client,
    base_url: String,
    api_key: String,
    timeout: Option<Duration>,
    token: RwLock<Option<String>>,
}

impl HttpClassroomApi {
    /// Creates a client from configuration. Fails when no API key is set.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();
        Ok(Self {
            client: Client::new(),
            base_url: config.base_url(),
            api_key,
            timeout: config.request_timeout_secs.map(Duration::from_secs),
            token: RwLock::new(None),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("{} {}", method, url);

        let mut request = self
            .client
            .request(method, &url)
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key);

        if let Some(token) = self.token.read().await.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        request
    }

    async fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| ClassroomError::transport(format!("{} request failed: {}", what, e)))?;

        let status = response.status();
        tracing::debug!("{} -> {}", what, status);
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClassroomError::status(status.as_u16(), error_text));
        }
        Ok(response)
    }

    async fn envelope(response: Response, what: &str) -> Result<Envelope> {
        let body = response
            .text()
            .await
            .map_err(|e| ClassroomError::transport(format!("Failed to read {} response: {}", what, e)))?;
        serde_json::from_str(&body)
            .map_err(|e| ClassroomError::malformed(format!("Failed to parse {} response: {}", what, e)))
    }
}

fn sign_in_from(data: Option<Value>) -> Result<SignIn> {
    let rejected = || ClassroomError::authentication("Invalid email or password");

    let data = data.ok_or_else(rejected)?;
    let token = data
        .get("token")
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .ok_or_else(rejected)?
        .to_string();

    let mut user: UserRecord = serde_json::from_value(data)
        .map_err(|e| ClassroomError::malformed(format!("Failed to parse user record: {}", e)))?;
    user.extra.remove("token");

    Ok(SignIn { token, user })
}

#[async_trait]
impl ClassroomApi for HttpClassroomApi {
    async fn set_bearer_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignIn> {
        let request = self
            .request(Method::POST, "/signin")
            .await
            .json(&SignInRequest { email, password });

        let response = match self.send(request, "Sign-in").await {
            Ok(response) => response,
            // Any client error on sign-in means the credentials were refused.
            Err(ClassroomError::Status { status, .. }) if (400..500).contains(&status) => {
                return Err(ClassroomError::authentication("Invalid email or password"));
            }
            Err(e) => return Err(e),
        };

        let envelope = Self::envelope(response, "sign-in").await?;
        sign_in_from(envelope.data)
    }

    async fn fetch_profile(&self) -> Result<Option<UserRecord>> {
        let request = self.request(Method::GET, "/profile").await;
        let response = self.send(request, "Profile").await?;
        let envelope = Self::envelope(response, "profile").await?;
        Ok(decode_one(envelope.data, "profile"))
    }

    async fn fetch_roster(&self, year: u32) -> Result<Vec<MemberRecord>> {
        let request = self.request(Method::GET, &format!("/class/{}", year)).await;
        let response = self.send(request, "Roster").await?;
        let envelope = Self::envelope(response, "roster").await?;
        Ok(decode_list(envelope.data, "member"))
    }

    async fn fetch_feed(&self) -> Result<Vec<PostRecord>> {
        let request = self.request(Method::GET, "/status").await;
        let response = self.send(request, "Feed").await?;
        let envelope = Self::envelope(response, "feed").await?;
        Ok(decode_list(envelope.data, "status"))
    }

    async fn create_post(&self, content: &str) -> Result<PostRecord> {
        let request = self
            .request(Method::POST, "/status")
            .await
            .json(&ContentRequest { content });
        let response = self.send(request, "Create post").await?;
        let envelope = Self::envelope(response, "create post").await?;
        decode_one(envelope.data, "status")
            .ok_or_else(|| ClassroomError::malformed("Create post response has no status record"))
    }

    async fn delete_post(&self, post_id: &str) -> Result<()> {
        let request = self
            .request(Method::DELETE, &format!("/status/{}", post_id))
            .await;
        self.send(request, "Delete post").await?;
        Ok(())
    }

    async fn like(&self, post_id: &str) -> Result<()> {
        let request = self
            .request(Method::POST, "/like")
            .await
            .json(&StatusRef { status_id: post_id });
        self.send(request, "Like").await?;
        Ok(())
    }

    async fn unlike(&self, post_id: &str) -> Result<()> {
        let request = self
            .request(Method::DELETE, "/like")
            .await
            .json(&StatusRef { status_id: post_id });
        self.send(request, "Unlike").await?;
        Ok(())
    }

    async fn comment(&self, post_id: &str, content: &str) -> Result<()> {
        let request = self
            .request(Method::POST, "/comment")
            .await
            .json(&CommentRequest {
                content,
                status_id: post_id,
            });
        self.send(request, "Comment").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_requires_api_key() {
        let err = HttpClassroomApi::new(&ApiConfig::default()).err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_base_url_from_config() {
        let config = ApiConfig {
            api_key: Some("k".into()),
            ..ApiConfig::default()
        };
        let api = HttpClassroomApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "https://cis.kku.ac.th/api/classroom");
    }

    #[test]
    fn test_sign_in_strips_token_from_user() {
        let sign_in = sign_in_from(Some(json!({
            "_id": "u1",
            "email": "u1@kkumail.com",
            "token": "tok-1"
        })))
        .unwrap();
        assert_eq!(sign_in.token, "tok-1");
        assert_eq!(sign_in.user.id, "u1");
        assert!(!sign_in.user.extra.contains_key("token"));
    }

    #[test]
    fn test_sign_in_without_token_is_rejected() {
        assert!(sign_in_from(None).unwrap_err().is_authentication());
        assert!(
            sign_in_from(Some(json!({"_id": "u1"})))
                .unwrap_err()
                .is_authentication()
        );
        assert!(
            sign_in_from(Some(json!({"token": ""})))
                .unwrap_err()
                .is_authentication()
        );
    }

    #[test]
    fn test_request_bodies() {
        assert_eq!(
            serde_json::to_value(StatusRef { status_id: "p1" }).unwrap(),
            json!({"statusId": "p1"})
        );
        assert_eq!(
            serde_json::to_value(CommentRequest {
                content: "nice",
                status_id: "p1"
            })
            .unwrap(),
            json!({"content": "nice", "statusId": "p1"})
        );
    }
}
