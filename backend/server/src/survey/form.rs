use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::{
    error::AppError,
    models::{ManualActivities, SurveyResponse},
    survey::trn::Trn,
    utils::FormFields,
    validation::validate_identity,
};

pub const PERSONAL_DETAILS_REQUIRED: &str =
    "Personal details (Full Name, Mobile Number, Email ID, Location) are required!";

pub const OTHER_PAIN_POINTS: &str = "otherPainPoints";
pub const OTHER_JUNIOR_ISSUES: &str = "otherJuniorIssues";
pub const OTHER_IT_BARRIERS: &str = "otherITBarriers";
pub const OTHER_AI_CHALLENGES: &str = "otherAIChallenges";

pub fn unanswered(question: u8) -> AppError {
    AppError::bad_input(format!(
        "Question {question} is empty. Please complete it before submitting the survey."
    ))
}

/// Form key carrying the license number of a profession, e.g. `CA` -> `caLicense`.
pub fn license_key(profession: &str) -> String {
    format!("{}License", profession.to_lowercase())
}

/// Multi-select answer with a free-text elaboration for its "other" option.
#[derive(Debug, Default, Clone)]
pub struct MultiSelect {
    pub selected: Vec<String>,
    pub other_text: Option<String>,
}

impl MultiSelect {
    fn read(fields: &FormFields, key: &str, other_key: &str) -> Self {
        Self {
            selected: fields.values(key),
            other_text: fields.owned(other_key),
        }
    }

    fn has(&self, option: &str) -> bool {
        self.selected.iter().any(|selected| selected == option)
    }

    /// Elaboration to store: required when `sentinel` is selected, blank otherwise.
    fn elaboration(&self, sentinel: &str, question: u8, label: &str) -> Result<String, AppError> {
        if !self.has(sentinel) {
            return Ok(String::new());
        }

        self.other_text.clone().ok_or_else(|| {
            AppError::bad_input(format!(
                "Please specify the other {label} in question {question}."
            ))
        })
    }
}

/// Survey submission as decoded from the form, before any check has run.
#[derive(Debug, Default, Clone)]
pub struct SurveyForm {
    pub full_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email_id: Option<String>,
    pub location: Option<String>,
    pub registration_no: Option<String>,
    pub referred_by: Option<String>,

    pub practicing_as: Vec<String>,
    /// License number submitted for each selected profession, in selection order.
    pub licenses: Vec<(String, Option<String>)>,
    pub how_operate: Option<String>,
    pub annual_income: Option<String>,
    pub practice_location: Option<String>,
    pub experience: Option<String>,
    pub team_members: Option<String>,
    pub junior_compensation: Option<String>,

    pub pain_points: MultiSelect,
    pub junior_issues: MultiSelect,
    pub data_entry: Option<String>,
    pub drafting_manual: Option<String>,
    pub calculations: Option<String>,
    pub research: Option<String>,
    pub reviewing_work: Option<String>,
    pub it_tool_barriers: MultiSelect,

    pub ai_challenges: MultiSelect,
    pub ai_view: Option<String>,

    pub ai_software_likelihood: Option<String>,
    pub referral_fee_likelihood: Option<String>,
}

impl SurveyForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        let practicing_as = fields.values("practicingAs");
        let licenses = practicing_as
            .iter()
            .map(|profession| (profession.clone(), fields.owned(&license_key(profession))))
            .collect();

        Self {
            full_name: fields.owned("fullName"),
            mobile_number: fields.owned("mobileNumber"),
            email_id: fields.owned("emailId"),
            location: fields.owned("location"),
            registration_no: fields.owned("registrationNo"),
            referred_by: fields.owned("referredBy"),

            practicing_as,
            licenses,
            how_operate: fields.owned("howOperate"),
            annual_income: fields.owned("annualIncome"),
            practice_location: fields.owned("practiceLocation"),
            experience: fields.owned("experience"),
            team_members: fields.owned("teamMembers"),
            junior_compensation: fields.owned("juniorCompensation"),

            pain_points: MultiSelect::read(fields, "painPoints", "otherPainPointsText"),
            junior_issues: MultiSelect::read(fields, "juniorIssues", "otherJuniorIssuesText"),
            data_entry: fields.owned("dataEntry"),
            drafting_manual: fields.owned("draftingManual"),
            calculations: fields.owned("calculations"),
            research: fields.owned("research"),
            reviewing_work: fields.owned("reviewingWork"),
            it_tool_barriers: MultiSelect::read(fields, "itToolBarriers", "otherITBarriersText"),

            ai_challenges: MultiSelect::read(fields, "aiChallenges", "otherAIChallengesText"),
            ai_view: fields.owned("aiView"),

            ai_software_likelihood: fields.owned("aiSoftwareLikelihood"),
            referral_fee_likelihood: fields.owned("referralFeeLikelihood"),
        }
    }

    /// Presence, license and elaboration checks, in that order.
    pub fn complete(self) -> Result<SurveyAnswers, AppError> {
        let (Some(full_name), Some(mobile_number), Some(email_id), Some(location)) = (
            self.full_name,
            self.mobile_number,
            self.email_id,
            self.location,
        ) else {
            return Err(AppError::bad_input(PERSONAL_DETAILS_REQUIRED));
        };

        if self.practicing_as.is_empty() {
            return Err(unanswered(1));
        }
        let how_operate = answered(self.how_operate, 2)?;
        let annual_income = answered(self.annual_income, 3)?;
        let practice_location = answered(self.practice_location, 4)?;
        let experience = answered(self.experience, 5)?;
        let team_members = answered(self.team_members, 6)?;
        let junior_compensation = answered(self.junior_compensation, 7)?;
        let pain_points = selected(self.pain_points, 8)?;
        let junior_issues = selected(self.junior_issues, 9)?;

        let (
            Some(data_entry),
            Some(drafting_manual),
            Some(calculations),
            Some(research),
            Some(reviewing_work),
        ) = (
            self.data_entry,
            self.drafting_manual,
            self.calculations,
            self.research,
            self.reviewing_work,
        )
        else {
            return Err(unanswered(10));
        };

        let it_tool_barriers = selected(self.it_tool_barriers, 11)?;
        let ai_challenges = selected(self.ai_challenges, 12)?;
        let ai_view = answered(self.ai_view, 13)?;
        let ai_software_likelihood = answered(self.ai_software_likelihood, 14)?;
        let referral_fee_likelihood = answered(self.referral_fee_likelihood, 15)?;

        let mut practicing_as = BTreeMap::new();
        for (profession, license) in self.licenses {
            let license = license.ok_or_else(|| {
                AppError::bad_input(format!(
                    "Please enter the license number for {profession}."
                ))
            })?;
            practicing_as.insert(profession, license);
        }

        let other_pain_points_text = pain_points.elaboration(OTHER_PAIN_POINTS, 8, "pain point")?;
        let other_junior_issues_text =
            junior_issues.elaboration(OTHER_JUNIOR_ISSUES, 9, "junior issue")?;
        let other_it_barriers_text =
            it_tool_barriers.elaboration(OTHER_IT_BARRIERS, 11, "IT tool barrier")?;
        let other_ai_challenges_text =
            ai_challenges.elaboration(OTHER_AI_CHALLENGES, 12, "AI challenge")?;

        Ok(SurveyAnswers {
            full_name,
            mobile_number,
            email_id,
            location,
            registration_no: self.registration_no,
            referred_by: self.referred_by,
            practicing_as,
            how_operate,
            annual_income,
            practice_location,
            experience,
            team_members,
            junior_compensation,
            pain_points: pain_points.selected,
            other_pain_points_text,
            junior_issues: junior_issues.selected,
            other_junior_issues_text,
            manual_activities: ManualActivities {
                data_entry,
                drafting_manual,
                calculations,
                research,
                reviewing_work,
            },
            it_tool_barriers: it_tool_barriers.selected,
            other_it_barriers_text,
            ai_challenges: ai_challenges.selected,
            other_ai_challenges_text,
            ai_view,
            ai_software_likelihood,
            referral_fee_likelihood,
        })
    }
}

fn answered(value: Option<String>, question: u8) -> Result<String, AppError> {
    value.ok_or_else(|| unanswered(question))
}

fn selected(answer: MultiSelect, question: u8) -> Result<MultiSelect, AppError> {
    if answer.selected.is_empty() {
        Err(unanswered(question))
    } else {
        Ok(answer)
    }
}

/// Every question answered, licenses and elaborations supplied.
#[derive(Debug, Clone)]
pub struct SurveyAnswers {
    pub full_name: String,
    pub mobile_number: String,
    pub email_id: String,
    pub location: String,
    pub registration_no: Option<String>,
    pub referred_by: Option<String>,
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
    pub other_it_barriers_text: String,
    pub ai_challenges: Vec<String>,
    pub other_ai_challenges_text: String,
    pub ai_view: String,
    pub ai_software_likelihood: String,
    pub referral_fee_likelihood: String,
}

impl SurveyAnswers {
    pub fn validate_formats(&self) -> Result<(), AppError> {
        validate_identity(&self.full_name, &self.email_id, &self.mobile_number)
    }

    pub fn into_response(self, trn: Trn, created_at: DateTime<Utc>) -> SurveyResponse {
        SurveyResponse {
            full_name: self.full_name,
            mobile_number: self.mobile_number,
            email_id: self.email_id,
            location: self.location,
            registration_no: self.registration_no,
            referred_by: self.referred_by,
            practicing_as: self.practicing_as,
            how_operate: self.how_operate,
            annual_income: self.annual_income,
            practice_location: self.practice_location,
            experience: self.experience,
            team_members: self.team_members,
            junior_compensation: self.junior_compensation,
            pain_points: self.pain_points,
            other_pain_points_text: self.other_pain_points_text,
            junior_issues: self.junior_issues,
            other_junior_issues_text: self.other_junior_issues_text,
            manual_activities: self.manual_activities,
            it_tool_barriers: self.it_tool_barriers,
            other_it_barriers_text: self.other_it_barriers_text,
            ai_challenges: self.ai_challenges,
            other_ai_challenges_text: self.other_ai_challenges_text,
            ai_view: self.ai_view,
            ai_software_likelihood: self.ai_software_likelihood,
            referral_fee_likelihood: self.referral_fee_likelihood,
            trn: trn.to_string(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers() -> SurveyForm {
        SurveyForm {
            full_name: Some("Asha Rao".into()),
            mobile_number: Some("9876543210".into()),
            email_id: Some("asha@example.com".into()),
            location: Some("Pune".into()),
            practicing_as: vec!["CA".into()],
            licenses: vec![("CA".into(), Some("123456".into()))],
            how_operate: Some("solo".into()),
            annual_income: Some("10-25L".into()),
            practice_location: Some("metro".into()),
            experience: Some("5-10".into()),
            team_members: Some("2-5".into()),
            junior_compensation: Some("stipend".into()),
            pain_points: MultiSelect {
                selected: vec!["billing".into()],
                other_text: None,
            },
            junior_issues: MultiSelect {
                selected: vec!["attrition".into()],
                other_text: None,
            },
            data_entry: Some("high".into()),
            drafting_manual: Some("medium".into()),
            calculations: Some("low".into()),
            research: Some("high".into()),
            reviewing_work: Some("medium".into()),
            it_tool_barriers: MultiSelect {
                selected: vec!["cost".into()],
                other_text: None,
            },
            ai_challenges: MultiSelect {
                selected: vec!["trust".into()],
                other_text: None,
            },
            ai_view: Some("useful".into()),
            ai_software_likelihood: Some("likely".into()),
            referral_fee_likelihood: Some("unlikely".into()),
            ..Default::default()
        }
    }

    fn message(form: SurveyForm) -> String {
        form.complete().unwrap_err().to_string()
    }

    #[test]
    fn test_license_key() {
        assert_eq!(license_key("CA"), "caLicense");
        assert_eq!(license_key("Lawyer"), "lawyerLicense");
    }

    #[test]
    fn test_complete_form() {
        let answers = answers().complete().unwrap();

        assert_eq!(answers.practicing_as.get("CA").map(String::as_str), Some("123456"));
        assert_eq!(answers.other_pain_points_text, "");
        assert!(answers.validate_formats().is_ok());
    }

    #[test]
    fn test_each_identity_field_required() {
        let clears: [fn(&mut SurveyForm); 4] = [
            |form| form.full_name = None,
            |form| form.mobile_number = None,
            |form| form.email_id = None,
            |form| form.location = None,
        ];

        for clear in clears {
            let mut form = answers();
            clear(&mut form);
            assert_eq!(message(form), PERSONAL_DETAILS_REQUIRED);
        }
    }

    #[test]
    fn test_questions_numbered() {
        let mut form = answers();
        form.practicing_as.clear();
        assert_eq!(message(form), unanswered(1).to_string());

        let mut form = answers();
        form.junior_compensation = None;
        assert_eq!(message(form), unanswered(7).to_string());

        let mut form = answers();
        form.research = None;
        assert_eq!(message(form), unanswered(10).to_string());

        let mut form = answers();
        form.ai_challenges.selected.clear();
        assert_eq!(message(form), unanswered(12).to_string());

        let mut form = answers();
        form.referral_fee_likelihood = None;
        assert_eq!(
            message(form),
            "Question 15 is empty. Please complete it before submitting the survey."
        );
    }

    #[test]
    fn test_missing_question_reported_before_license() {
        let mut form = answers();
        form.licenses = vec![("CA".into(), None)];
        form.ai_view = None;

        assert_eq!(message(form), unanswered(13).to_string());
    }

    #[test]
    fn test_first_missing_license_named() {
        let mut form = answers();
        form.practicing_as = vec!["CA".into(), "CS".into(), "Lawyer".into()];
        form.licenses = vec![
            ("CA".into(), Some("1".into())),
            ("CS".into(), None),
            ("Lawyer".into(), None),
        ];

        assert_eq!(message(form), "Please enter the license number for CS.");
    }

    #[test]
    fn test_other_requires_elaboration() {
        let mut form = answers();
        form.it_tool_barriers.selected.push(OTHER_IT_BARRIERS.into());
        assert_eq!(
            message(form),
            "Please specify the other IT tool barrier in question 11."
        );

        let mut form = answers();
        form.ai_challenges.selected.push(OTHER_AI_CHALLENGES.into());
        form.ai_challenges.other_text = Some("hallucinations".into());
        let answers = form.complete().unwrap();
        assert_eq!(answers.other_ai_challenges_text, "hallucinations");
    }

    #[test]
    fn test_elaboration_dropped_without_other() {
        let mut form = answers();
        form.pain_points.other_text = Some("ignored".into());

        assert_eq!(form.complete().unwrap().other_pain_points_text, "");
    }
}
