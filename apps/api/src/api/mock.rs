//! Mock backend: answers every operation from the in-memory fixture set.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use rand::Rng;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::api::envelope::Envelope;
use crate::api::fixtures::{
    registered_user, Fixtures, DEMO_USER, MOCK_ACCESS_TOKEN, MOCK_REFRESH_TOKEN,
};
use crate::api::operation::Operation;
use crate::api::{ApiError, Backend};
use crate::models::{AuthPayload, Portfolio, Resume, SubscriptionStatus, User};

/// Simulated network latency applied before each mock answer.
pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(300);

const COMPATIBILITY_SCORE_MIN: u32 = 80;
const COMPATIBILITY_SCORE_MAX: u32 = 100; // exclusive

pub struct MockBackend {
    fixtures: Fixtures,
    delay: Duration,
}

impl MockBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            fixtures: Fixtures::default(),
            delay,
        }
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Resolves an operation against the fixtures without the latency delay.
    pub fn respond(&self, operation: &Operation) -> Result<Envelope<Value>, ApiError> {
        let envelope = match operation {
            Operation::Login { email, password } => {
                if email == DEMO_USER.email && password == DEMO_USER.password {
                    Envelope::ok(to_value(&self.auth_payload(self.fixtures.user.clone()))?)
                } else {
                    Envelope::failure("Invalid credentials")
                }
            }
            Operation::Register { name, email, .. } => {
                Envelope::ok(to_value(&self.auth_payload(registered_user(name, email)))?)
                    .with_message("User registered successfully")
            }
            Operation::ListResumes => Envelope::ok(to_value(&self.fixtures.resumes)?),
            Operation::CreateResume {
                original_content,
                job_description,
                template_used,
            } => Envelope::ok(to_value(&self.synthesize_resume(
                original_content,
                job_description,
                template_used.as_deref(),
            ))?),
            Operation::GetResume { id } => match self.fixtures.resumes.iter().find(|r| &r.id == id)
            {
                Some(resume) => Envelope::ok(to_value(resume)?),
                None => Envelope::failure("Resume not found"),
            },
            // Deletion is local to the caller; fixtures stay intact.
            Operation::DeleteResume { .. } => {
                Envelope::ok_empty().with_message("Resume deleted successfully")
            }
            Operation::GeneratePortfolio { .. } => Envelope::ok(to_value(&self.fixtures.portfolio)?)
                .with_message("Portfolio generated successfully"),
            Operation::GetPortfolio { .. } => Envelope::ok(to_value(&self.fixtures.portfolio)?),
            Operation::UpdatePortfolio { content, .. } => {
                let updated = Portfolio {
                    content: content.clone(),
                    ..self.fixtures.portfolio.clone()
                };
                Envelope::ok(to_value(&updated)?).with_message("Portfolio updated successfully")
            }
            Operation::GetAnalytics => Envelope::ok(to_value(&self.fixtures.analytics)?),
            Operation::SubscriptionStatus => {
                let tier = self.fixtures.user.subscription_status;
                Envelope::ok(to_value(&SubscriptionStatus {
                    status: tier,
                    plan_type: tier,
                })?)
            }
            Operation::RewriteResume { .. }
            | Operation::GenerateCoverLetter { .. }
            | Operation::CalculateCompatibility { .. }
            | Operation::CreateSubscription { .. }
            | Operation::CancelSubscription => {
                warn!(
                    "No mock fixture for {} {}, answering with empty data",
                    operation.method(),
                    operation.path()
                );
                Envelope::ok(json!({}))
            }
        };

        Ok(envelope)
    }

    fn auth_payload(&self, user: User) -> AuthPayload {
        AuthPayload {
            user,
            access_token: MOCK_ACCESS_TOKEN.to_string(),
            refresh_token: MOCK_REFRESH_TOKEN.to_string(),
        }
    }

    /// Builds a resume record for a create call. Never added to the fixture list.
    fn synthesize_resume(
        &self,
        original_content: &str,
        job_description: &str,
        template_used: Option<&str>,
    ) -> Resume {
        let now = Utc::now();
        let timestamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let described = if job_description.is_empty() {
            "No job description"
        } else {
            job_description
        };

        Resume {
            id: format!("resume-{}", now.timestamp_millis()),
            user_id: self.fixtures.user.id.clone(),
            original_content: original_content.to_string(),
            job_description: job_description.to_string(),
            ai_generated_content: Some(format!("AI-generated content for: {described}")),
            template_used: template_used
                .filter(|t| !t.is_empty())
                .unwrap_or("modern")
                .to_string(),
            compatibility_score: Some(
                rand::thread_rng().gen_range(COMPATIBILITY_SCORE_MIN..COMPATIBILITY_SCORE_MAX),
            ),
            s3_file_path: None,
            created_at: timestamp.clone(),
            updated_at: timestamp,
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_DELAY)
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn dispatch(
        &self,
        operation: &Operation,
        _headers: &HeaderMap,
    ) -> Result<Envelope<Value>, ApiError> {
        tokio::time::sleep(self.delay).await;
        debug!("mock {} {}", operation.method(), operation.path());
        self.respond(operation)
    }

    fn is_mock(&self) -> bool {
        true
    }
}

fn to_value<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(ApiError::Parse)
}
