use serde::{Deserialize, Serialize};

use crate::models::Resume;

const DEFAULT_SUBSCRIPTION_LABEL: &str = "Free";

/// Counters shown on the dashboard landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_resumes: usize,
    pub ai_generations: usize,
    pub portfolios: usize,
    pub subscription_status: String,
}

impl DashboardStats {
    pub fn from_resumes(resumes: &[Resume], subscription_status: Option<&str>) -> Self {
        Self {
            total_resumes: resumes.len(),
            ai_generations: resumes.iter().filter(|r| r.is_ai_generated()).count(),
            // One portfolio per account.
            portfolios: 1,
            subscription_status: subscription_status
                .filter(|s| !s.is_empty())
                .unwrap_or(DEFAULT_SUBSCRIPTION_LABEL)
                .to_string(),
        }
    }
}
