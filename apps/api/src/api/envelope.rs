//! Uniform `{ success, data, error, message }` wrapper every API answer travels in.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Response envelope shared by the mock and live backends.
///
/// Built through the constructors below, which keep the invariant that a
/// successful envelope never carries `error` and a failed one never carries
/// `data`. Envelopes decoded from a live server are taken as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Success without a payload (e.g. deletions).
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            message: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            data: self.data.map(f),
            error: self.error,
            message: self.message,
        }
    }
}

impl Envelope<Value> {
    /// Decodes the untyped payload into `T`, keeping the other fields intact.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Envelope<T>, serde_json::Error> {
        let data = self.data.map(serde_json::from_value).transpose()?;
        Ok(Envelope {
            success: self.success,
            data,
            error: self.error,
            message: self.message,
        })
    }
}
