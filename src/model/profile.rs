//! Request and response bodies of the booster backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /apply`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub discord_id: String,
    pub game: String,
    pub application_type: String,
    pub application_language: String,
    pub region: String,
    pub rank: String,
    pub agreed_to_terms: bool,
}

/// Body of `PATCH /booster/profile/:id`; unset fields are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agreed_to_terms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hr_review: Option<String>,
}

impl ProfileUpdate {
    pub fn custom_name(name: impl Into<String>) -> Self {
        Self {
            custom_name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn agreed_to_terms() -> Self {
        Self {
            agreed_to_terms: Some(true),
            ..Self::default()
        }
    }

    pub fn status(status: &str) -> Self {
        Self {
            application_status: Some(status.to_string()),
            ..Self::default()
        }
    }

    /// Marks an application rejected with a review note, used to compensate a
    /// record whose follow-up steps could not complete.
    pub fn rejected_with_review(review: impl Into<String>) -> Self {
        Self {
            application_status: Some("rejected".to_string()),
            hr_review: Some(review.into()),
            ..Self::default()
        }
    }
}

/// Response of `GET /booster/profile/:id`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoosterProfile {
    #[serde(default)]
    pub game: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default)]
    pub custom_name: Option<String>,
    #[serde(default)]
    pub application_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl BoosterProfile {
    /// Whether the application behind this profile still awaits a decision.
    ///
    /// Profiles without a status are treated as pending.
    pub fn is_pending(&self) -> bool {
        matches!(self.application_status.as_deref(), None | Some("pending"))
    }

    /// Status as shown on the profile card.
    pub fn status_label(&self) -> &'static str {
        match self.application_status.as_deref() {
            Some("approved") => "✅ Approved",
            Some("rejected") => "❌ Rejected",
            _ => "Pending",
        }
    }
}

/// Error body returned by the backend on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDto {
    #[serde(alias = "message")]
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_partial_updates() {
        let body = serde_json::to_value(ProfileUpdate::custom_name("Ana Silva")).unwrap();
        assert_eq!(body, serde_json::json!({ "customName": "Ana Silva" }));

        let body = serde_json::to_value(ProfileUpdate::agreed_to_terms()).unwrap();
        assert_eq!(body, serde_json::json!({ "agreedToTerms": true }));
    }

    #[test]
    fn deserializes_profile() {
        let profile: BoosterProfile = serde_json::from_value(serde_json::json!({
            "game": "valorant",
            "region": "eu",
            "rank": "Immortal 3",
            "applicationStatus": "pending",
            "createdAt": "2025-01-30T12:00:00Z",
            "unrelated": 1
        }))
        .unwrap();

        assert_eq!(profile.rank.as_deref(), Some("Immortal 3"));
        assert!(profile.is_pending());
        assert_eq!(profile.status_label(), "Pending");
        assert_eq!(profile.custom_name, None);
        assert!(profile.created_at.is_some());
    }
}
