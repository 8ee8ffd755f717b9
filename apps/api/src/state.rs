use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::auth::provider::IdentityProvider;
use crate::config::Config;
use crate::experiences::store::ExperienceStore;
use crate::llm_client::LlmClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Used directly for shared report rows; experience access goes through `experiences`.
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable experience store. Default: PgExperienceStore.
    pub experiences: Arc<dyn ExperienceStore>,
    /// Pluggable identity provider. Default: HttpIdentityProvider.
    pub identity: Arc<dyn IdentityProvider>,
}
