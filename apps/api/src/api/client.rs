use std::sync::Arc;

use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::api::dashboard::DashboardStats;
use crate::api::envelope::Envelope;
use crate::api::fixtures::mock_resumes;
use crate::api::live::LiveBackend;
use crate::api::mock::MockBackend;
use crate::api::operation::Operation;
use crate::api::{ApiError, Backend};
use crate::config::{ApiMode, ClientConfig};
use crate::models::{
    AuthPayload, Portfolio, PortfolioAnalytics, PortfolioContent, Resume, SubscriptionStatus,
};
use crate::session::TokenStore;

/// Uniform async call surface over the mock or live backend.
///
/// The mode is decided once, from the `ClientConfig` given at construction.
#[derive(Clone)]
pub struct ApiClient {
    backend: Arc<dyn Backend>,
}

impl ApiClient {
    /// `tokens` is the store the token synchronizer writes to; the live
    /// backend reads the access token from it on every request.
    pub fn new(config: &ClientConfig, tokens: Option<Arc<dyn TokenStore>>) -> Self {
        let backend: Arc<dyn Backend> = match &config.mode {
            ApiMode::Mock => {
                info!("API client in mock mode");
                Arc::new(MockBackend::new(config.mock_delay))
            }
            ApiMode::Live { base_url } => {
                info!("API client in live mode against {base_url}");
                Arc::new(LiveBackend::new(base_url, tokens))
            }
        };
        Self { backend }
    }

    pub fn with_backend(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    pub fn is_mock(&self) -> bool {
        self.backend.is_mock()
    }

    pub async fn dispatch(&self, operation: Operation) -> Result<Envelope<Value>, ApiError> {
        self.dispatch_with_headers(operation, HeaderMap::new()).await
    }

    /// Like [`ApiClient::dispatch`], with extra request headers that take
    /// precedence over the defaults in live mode.
    pub async fn dispatch_with_headers(
        &self,
        operation: Operation,
        headers: HeaderMap,
    ) -> Result<Envelope<Value>, ApiError> {
        self.backend.dispatch(&operation, &headers).await
    }

    async fn call<T: DeserializeOwned>(&self, operation: Operation) -> Result<Envelope<T>, ApiError> {
        Ok(self.dispatch(operation).await?.decode()?)
    }

    // Auth

    pub async fn login(&self, email: &str, password: &str) -> Result<Envelope<AuthPayload>, ApiError> {
        self.call(Operation::Login {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Envelope<AuthPayload>, ApiError> {
        self.call(Operation::Register {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    // Resumes

    pub async fn create_resume(
        &self,
        original_content: &str,
        job_description: &str,
        template_used: Option<&str>,
    ) -> Result<Envelope<Resume>, ApiError> {
        self.call(Operation::CreateResume {
            original_content: original_content.to_string(),
            job_description: job_description.to_string(),
            template_used: template_used.map(str::to_string),
        })
        .await
    }

    pub async fn get_resumes(&self) -> Result<Envelope<Vec<Resume>>, ApiError> {
        self.call(Operation::ListResumes).await
    }

    pub async fn get_resume(&self, id: &str) -> Result<Envelope<Resume>, ApiError> {
        self.call(Operation::GetResume { id: id.to_string() }).await
    }

    pub async fn delete_resume(&self, id: &str) -> Result<Envelope<Value>, ApiError> {
        self.dispatch(Operation::DeleteResume { id: id.to_string() })
            .await
    }

    // AI

    pub async fn rewrite_resume(
        &self,
        resume_id: &str,
        job_description: &str,
    ) -> Result<Envelope<Value>, ApiError> {
        self.dispatch(Operation::RewriteResume {
            resume_id: resume_id.to_string(),
            job_description: job_description.to_string(),
        })
        .await
    }

    pub async fn generate_cover_letter(
        &self,
        resume_id: &str,
        company_name: &str,
    ) -> Result<Envelope<Value>, ApiError> {
        self.dispatch(Operation::GenerateCoverLetter {
            resume_id: resume_id.to_string(),
            company_name: company_name.to_string(),
        })
        .await
    }

    pub async fn calculate_compatibility(
        &self,
        resume_id: &str,
        job_description: &str,
    ) -> Result<Envelope<Value>, ApiError> {
        self.dispatch(Operation::CalculateCompatibility {
            resume_id: resume_id.to_string(),
            job_description: job_description.to_string(),
        })
        .await
    }

    // Portfolios

    pub async fn generate_portfolio(&self, resume_id: &str) -> Result<Envelope<Portfolio>, ApiError> {
        self.call(Operation::GeneratePortfolio {
            resume_id: resume_id.to_string(),
        })
        .await
    }

    pub async fn get_portfolio(&self, id: &str) -> Result<Envelope<Portfolio>, ApiError> {
        self.call(Operation::GetPortfolio { id: id.to_string() })
            .await
    }

    pub async fn update_portfolio(
        &self,
        id: &str,
        content: PortfolioContent,
    ) -> Result<Envelope<Portfolio>, ApiError> {
        self.call(Operation::UpdatePortfolio {
            id: id.to_string(),
            content,
        })
        .await
    }

    pub async fn get_analytics(&self) -> Result<Envelope<PortfolioAnalytics>, ApiError> {
        self.call(Operation::GetAnalytics).await
    }

    // Subscriptions

    pub async fn create_subscription(&self, price_id: &str) -> Result<Envelope<Value>, ApiError> {
        self.dispatch(Operation::CreateSubscription {
            price_id: price_id.to_string(),
        })
        .await
    }

    pub async fn get_subscription_status(
        &self,
    ) -> Result<Envelope<SubscriptionStatus>, ApiError> {
        self.call(Operation::SubscriptionStatus).await
    }

    pub async fn cancel_subscription(&self) -> Result<Envelope<Value>, ApiError> {
        self.dispatch(Operation::CancelSubscription).await
    }

    /// Dashboard counters for the signed-in user. Falls back to the demo
    /// resumes when the listing fails or comes back empty-handed.
    pub async fn dashboard_stats(&self, subscription_status: Option<&str>) -> DashboardStats {
        let resumes = match self.get_resumes().await {
            Ok(Envelope {
                data: Some(resumes),
                ..
            }) => resumes,
            Ok(_) => {
                warn!("Resume listing returned no data, using demo resumes");
                mock_resumes()
            }
            Err(e) => {
                warn!("Resume listing failed, using demo resumes: {e}");
                mock_resumes()
            }
        };

        DashboardStats::from_resumes(&resumes, subscription_status)
    }
}
