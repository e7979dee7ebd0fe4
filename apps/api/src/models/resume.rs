use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub id: String,
    pub user_id: String,
    pub original_content: String,
    pub job_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_generated_content: Option<String>,
    pub template_used: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibility_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s3_file_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Resume {
    /// Whether the AI rewrite has already run for this resume.
    pub fn is_ai_generated(&self) -> bool {
        self.ai_generated_content
            .as_deref()
            .is_some_and(|content| !content.is_empty())
    }
}
