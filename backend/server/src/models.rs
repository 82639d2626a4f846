use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON body returned by every form endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub status: Status,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trn: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Info,
    Danger,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: Status::Success,
            message: message.into(),
            trn: None,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            status: Status::Info,
            message: message.into(),
            trn: None,
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            status: Status::Danger,
            message: message.into(),
            trn: None,
        }
    }

    pub fn with_trn(mut self, trn: impl ToString) -> Self {
        self.trn = Some(trn.to_string());
        self
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ManualActivities {
    pub data_entry: String,
    pub drafting_manual: String,
    pub calculations: String,
    pub research: String,
    pub reviewing_work: String,
}

/// Stored survey document. Field names match the survey form's keys.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SurveyResponse {
    pub full_name: String,
    pub mobile_number: String,
    pub email_id: String,
    pub location: String,
    pub registration_no: Option<String>,
    pub referred_by: Option<String>,

    /// Profession to license number.
    pub practicing_as: BTreeMap<String, String>,
    pub how_operate: String,
    pub annual_income: String,
    pub practice_location: String,
    pub experience: String,
    pub team_members: String,
    pub junior_compensation: String,

    pub pain_points: Vec<String>,
    pub other_pain_points_text: String,
    pub junior_issues: Vec<String>,
    pub other_junior_issues_text: String,
    pub manual_activities: ManualActivities,
    pub it_tool_barriers: Vec<String>,
    #[serde(rename = "otherITBarriersText")]
    pub other_it_barriers_text: String,

    pub ai_challenges: Vec<String>,
    #[serde(rename = "otherAIChallengesText")]
    pub other_ai_challenges_text: String,
    pub ai_view: String,

    pub ai_software_likelihood: String,
    pub referral_fee_likelihood: String,

    pub trn: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_notice_omits_missing_trn() {
        let body = serde_json::to_value(Notice::danger("Invalid email format.")).unwrap();
        assert_eq!(
            body,
            json!({"status": "danger", "message": "Invalid email format."})
        );
    }

    #[test]
    fn test_notice_with_trn() {
        let body = serde_json::to_value(Notice::success("done").with_trn("T-02805")).unwrap();
        assert_eq!(
            body,
            json!({"status": "success", "message": "done", "trn": "T-02805"})
        );
    }
}
