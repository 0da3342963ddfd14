use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use swot_db::DocumentStore;

use crate::{ApiConfig, config::Environment, hierarchy::HierarchyService};

/// Settings needed to issue and verify auth tokens
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

#[derive(Clone)]
pub struct ApiState {
    pub hierarchy: HierarchyService,
    pub auth: AuthConfig,
    pub cookie_key: Key,
    pub environment: Environment,
}

impl ApiState {
    pub fn new(config: &ApiConfig, store: Arc<dyn DocumentStore>) -> anyhow::Result<Self> {
        let cookie_key = Key::try_from(config.cookie_secret.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid COOKIE_SECRET: {e}"))?;

        Ok(Self {
            hierarchy: HierarchyService::new(store),
            auth: AuthConfig {
                jwt_secret: config.jwt_secret.clone(),
            },
            cookie_key,
            environment: config.environment,
        })
    }
}

impl FromRef<ApiState> for Key {
    fn from_ref(state: &ApiState) -> Self {
        state.cookie_key.clone()
    }
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        state.auth.clone()
    }
}

impl FromRef<ApiState> for HierarchyService {
    fn from_ref(state: &ApiState) -> Self {
        state.hierarchy.clone()
    }
}
