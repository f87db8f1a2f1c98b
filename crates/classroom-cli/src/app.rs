//! Wires configuration, the session store and the HTTP gateway into the
//! application use cases.

use anyhow::{Context, Result};
use classroom_application::{AuthUseCase, DirectoryService, FeedService};
use classroom_core::avatar::AvatarResolver;
use classroom_core::config::ApiConfig;
use classroom_core::feed::NormalizeContext;
use classroom_gateway::HttpClassroomApi;
use classroom_infrastructure::{ConfigService, TomlSessionStore};
use std::path::Path;
use std::sync::Arc;

pub struct App {
    pub config: ApiConfig,
    pub auth: AuthUseCase,
    api: Arc<HttpClassroomApi>,
}

impl App {
    pub fn load(config_dir: Option<&Path>, origin: Option<String>) -> Result<Self> {
        let config_service = ConfigService::new(config_dir)?;
        let mut config = config_service.load()?;
        if let Some(origin) = origin {
            config.origin = origin;
        }
        let api = Arc::new(
            HttpClassroomApi::new(&config)
                .with_context(|| format!("Set api_key in {:?} or export API_KEY", config_service.config_path()))?,
        );
        tracing::debug!("Using backend {}", api.base_url());
        let store = Arc::new(TomlSessionStore::new(config_dir)?);
        let auth = AuthUseCase::new(api.clone(), store);

        Ok(Self { config, auth, api })
    }

    pub fn avatars(&self) -> AvatarResolver {
        AvatarResolver::from_config(&self.config)
    }

    pub fn directory(&self) -> DirectoryService {
        DirectoryService::new(self.api.clone(), self.avatars(), self.config.roster_year)
    }

    /// A feed engine for the signed-in user. Fails when nobody is signed in.
    pub async fn feed(&self) -> Result<FeedService> {
        let session = self
            .auth
            .require_session()
            .await
            .context("Run `classroom signin` first")?;
        let ctx = NormalizeContext::for_session(&session, self.avatars());
        Ok(FeedService::new(self.api.clone(), ctx))
    }
}
