//! The closed set of logical API operations the dispatcher understands.

use reqwest::Method;
use serde_json::{json, Value};

use crate::models::PortfolioContent;

/// One logical backend call with its typed parameters.
///
/// Both backends match on this exhaustively; adding a variant forces the
/// mock fixtures and the wire mapping to be considered together.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Login {
        email: String,
        password: String,
    },
    Register {
        name: String,
        email: String,
        password: String,
    },
    CreateResume {
        original_content: String,
        job_description: String,
        template_used: Option<String>,
    },
    ListResumes,
    GetResume {
        id: String,
    },
    DeleteResume {
        id: String,
    },
    RewriteResume {
        resume_id: String,
        job_description: String,
    },
    GenerateCoverLetter {
        resume_id: String,
        company_name: String,
    },
    CalculateCompatibility {
        resume_id: String,
        job_description: String,
    },
    GeneratePortfolio {
        resume_id: String,
    },
    GetPortfolio {
        id: String,
    },
    UpdatePortfolio {
        id: String,
        content: PortfolioContent,
    },
    GetAnalytics,
    CreateSubscription {
        price_id: String,
    },
    SubscriptionStatus,
    CancelSubscription,
}

impl Operation {
    pub fn method(&self) -> Method {
        match self {
            Operation::ListResumes
            | Operation::GetResume { .. }
            | Operation::GetPortfolio { .. }
            | Operation::GetAnalytics
            | Operation::SubscriptionStatus => Method::GET,
            Operation::DeleteResume { .. } => Method::DELETE,
            Operation::UpdatePortfolio { .. } => Method::PUT,
            Operation::Login { .. }
            | Operation::Register { .. }
            | Operation::CreateResume { .. }
            | Operation::RewriteResume { .. }
            | Operation::GenerateCoverLetter { .. }
            | Operation::CalculateCompatibility { .. }
            | Operation::GeneratePortfolio { .. }
            | Operation::CreateSubscription { .. }
            | Operation::CancelSubscription => Method::POST,
        }
    }

    /// Path relative to the API base URL.
    pub fn path(&self) -> String {
        match self {
            Operation::Login { .. } => "/auth/login".to_string(),
            Operation::Register { .. } => "/auth/register".to_string(),
            Operation::CreateResume { .. } | Operation::ListResumes => "/resumes".to_string(),
            Operation::GetResume { id } | Operation::DeleteResume { id } => {
                format!("/resumes/{id}")
            }
            Operation::RewriteResume { .. } => "/ai/rewrite-resume".to_string(),
            Operation::GenerateCoverLetter { .. } => "/ai/generate-cover-letter".to_string(),
            Operation::CalculateCompatibility { .. } => "/ai/calculate-compatibility".to_string(),
            Operation::GeneratePortfolio { .. } => "/portfolios/generate".to_string(),
            Operation::GetPortfolio { id } | Operation::UpdatePortfolio { id, .. } => {
                format!("/portfolios/{id}")
            }
            Operation::GetAnalytics => "/analytics".to_string(),
            Operation::CreateSubscription { .. } => "/subscriptions/create".to_string(),
            Operation::SubscriptionStatus => "/subscriptions/status".to_string(),
            Operation::CancelSubscription => "/subscriptions/cancel".to_string(),
        }
    }

    /// JSON request body, keyed the way the backend expects (camelCase).
    pub fn body(&self) -> Option<Value> {
        match self {
            Operation::Login { email, password } => {
                Some(json!({ "email": email, "password": password }))
            }
            Operation::Register {
                name,
                email,
                password,
            } => Some(json!({ "name": name, "email": email, "password": password })),
            Operation::CreateResume {
                original_content,
                job_description,
                template_used,
            } => Some(json!({
                "originalContent": original_content,
                "jobDescription": job_description,
                "templateUsed": template_used,
            })),
            Operation::RewriteResume {
                resume_id,
                job_description,
            }
            | Operation::CalculateCompatibility {
                resume_id,
                job_description,
            } => Some(json!({ "resumeId": resume_id, "jobDescription": job_description })),
            Operation::GenerateCoverLetter {
                resume_id,
                company_name,
            } => Some(json!({ "resumeId": resume_id, "companyName": company_name })),
            Operation::GeneratePortfolio { resume_id } => Some(json!({ "resumeId": resume_id })),
            Operation::UpdatePortfolio { content, .. } => Some(json!({ "content": content })),
            Operation::CreateSubscription { price_id } => Some(json!({ "priceId": price_id })),
            Operation::ListResumes
            | Operation::GetResume { .. }
            | Operation::DeleteResume { .. }
            | Operation::GetPortfolio { .. }
            | Operation::GetAnalytics
            | Operation::SubscriptionStatus
            | Operation::CancelSubscription => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_paths_embed_the_id() {
        let get = Operation::GetResume {
            id: "resume-2".to_string(),
        };
        let delete = Operation::DeleteResume {
            id: "resume-2".to_string(),
        };
        assert_eq!(get.path(), "/resumes/resume-2");
        assert_eq!(get.method(), Method::GET);
        assert_eq!(delete.path(), "/resumes/resume-2");
        assert_eq!(delete.method(), Method::DELETE);
    }

    #[test]
    fn test_create_resume_body_uses_wire_keys() {
        let op = Operation::CreateResume {
            original_content: "cv".to_string(),
            job_description: "jd".to_string(),
            template_used: None,
        };
        let body = op.body().unwrap();
        assert_eq!(body["originalContent"], "cv");
        assert_eq!(body["jobDescription"], "jd");
        assert!(body["templateUsed"].is_null());
    }

    #[test]
    fn test_reads_carry_no_body() {
        assert!(Operation::ListResumes.body().is_none());
        assert!(Operation::SubscriptionStatus.body().is_none());
        assert!(Operation::CancelSubscription.body().is_none());
        assert_eq!(Operation::CancelSubscription.method(), Method::POST);
    }
}
