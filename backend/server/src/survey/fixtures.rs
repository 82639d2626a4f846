use chrono::Utc;

use crate::{
    models::SurveyResponse,
    survey::{form::SurveyForm, trn::Trn},
    utils::FormFields,
};

/// A complete survey form that passes every check.
pub fn submission(email: &str, mobile: &str) -> Vec<(String, String)> {
    [
        ("fullName", "Asha Rao"),
        ("mobileNumber", mobile),
        ("emailId", email),
        ("location", "Pune"),
        ("practicingAs", "CA"),
        ("caLicense", "123456"),
        ("howOperate", "solo"),
        ("annualIncome", "10-25L"),
        ("practiceLocation", "metro"),
        ("experience", "5-10"),
        ("teamMembers", "2-5"),
        ("juniorCompensation", "stipend"),
        ("painPoints", "billing"),
        ("juniorIssues", "attrition"),
        ("dataEntry", "high"),
        ("draftingManual", "medium"),
        ("calculations", "low"),
        ("research", "high"),
        ("reviewingWork", "medium"),
        ("itToolBarriers", "cost"),
        ("aiChallenges", "trust"),
        ("aiView", "useful"),
        ("aiSoftwareLikelihood", "likely"),
        ("referralFeeLikelihood", "unlikely"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Stored document for [`submission`], carrying `trn` verbatim.
pub fn response(email: &str, mobile: &str, trn: &str) -> SurveyResponse {
    let fields = FormFields::new(submission(email, mobile));
    let mut response = SurveyForm::from_fields(&fields)
        .complete()
        .unwrap()
        .into_response(Trn::new(0), Utc::now());

    response.trn = trn.to_string();
    response
}
