//! # Survey Intake
//!
//! Turns a submitted survey form into a stored [`SurveyResponse`] and its TRN.
//!
//! ## Order of checks
//!
//! The first failing check is the one reported to the submitter.
//! 1. Duplicate submitter: a stored survey with the same email or mobile number
//! 2. Presence: personal details, then questions 1 to 15
//! 3. A license number for every profession under "practicing as"
//! 4. An elaboration wherever an "other" option is selected
//! 5. Formats of name, email and mobile number
//!
//! Nothing is written unless every check passes. The store then reserves a TRN
//! and inserts the document, refusing it if the submitter's identity was
//! claimed in the meantime.
//!
//! [`SurveyResponse`]: crate::models::SurveyResponse
use chrono::Utc;
use tracing::{info, warn};

#[cfg(test)]
pub(crate) mod fixtures;
pub mod form;
pub mod trn;

use crate::{error::AppError, store::Store, utils::FormFields};
use form::SurveyForm;
use trn::Trn;

pub const SUBMITTED: &str =
    "Survey submitted successfully! Your Temporary Registration Number (TRN) is";

const CONTEXT: &str = "Error submitting survey";

pub async fn intake(store: &dyn Store, fields: &FormFields) -> Result<Trn, AppError> {
    let form = SurveyForm::from_fields(fields);

    let taken = store
        .survey_identity_exists(form.email_id.as_deref(), form.mobile_number.as_deref())
        .await
        .map_err(|e| AppError::from_store(CONTEXT, e))?;

    if taken {
        warn!("Rejected survey from an already registered submitter");
        return Err(AppError::Conflict);
    }

    let answers = form.complete()?;
    answers.validate_formats()?;

    let trn = store
        .next_trn()
        .await
        .map_err(|e| AppError::from_store(CONTEXT, e))?;

    let response = answers.into_response(trn, Utc::now());
    store
        .insert_survey(&response)
        .await
        .map_err(|e| AppError::from_store(CONTEXT, e))?;

    info!("Accepted survey {trn}");
    Ok(trn)
}
