use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::StoreError,
    models::{ContactMessage, Subscription, SurveyResponse},
    survey::trn::Trn,
};

/// Document store behind the form endpoints.
///
/// Every collection is insert-only.
#[async_trait]
pub trait Store: Send + Sync {
    /// Whether a stored survey already uses this email or mobile number.
    async fn survey_identity_exists(
        &self,
        email: Option<&str>,
        mobile: Option<&str>,
    ) -> Result<bool, StoreError>;

    /// Reserves the TRN for the next survey. Never hands out the same TRN twice.
    async fn next_trn(&self) -> Result<Trn, StoreError>;

    /// Fails with [`StoreError::DuplicateIdentity`] if the email or mobile
    /// number was claimed since the duplicate check.
    async fn insert_survey(&self, response: &SurveyResponse) -> Result<(), StoreError>;

    async fn insert_contact(&self, message: &ContactMessage) -> Result<(), StoreError>;

    /// Returns `false`, writing nothing, if the email is already subscribed.
    async fn insert_subscription(&self, subscription: &Subscription) -> Result<bool, StoreError>;
}

#[derive(Default)]
struct Collections {
    surveys: Vec<SurveyResponse>,
    reserved_trn: Option<Trn>,
    contacts: Vec<ContactMessage>,
    subscriptions: HashMap<String, Subscription>,
}

/// In-memory storage for testing and local development.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds survey documents as if they had been stored earlier.
    pub fn with_surveys(surveys: Vec<SurveyResponse>) -> Self {
        Self {
            collections: Mutex::new(Collections {
                surveys,
                ..Default::default()
            }),
        }
    }

    pub async fn surveys(&self) -> Vec<SurveyResponse> {
        self.collections.lock().await.surveys.clone()
    }

    pub async fn contacts(&self) -> Vec<ContactMessage> {
        self.collections.lock().await.contacts.clone()
    }

    pub async fn subscriptions(&self) -> Vec<Subscription> {
        self.collections
            .lock()
            .await
            .subscriptions
            .values()
            .cloned()
            .collect()
    }
}

fn identity_taken(surveys: &[SurveyResponse], email: Option<&str>, mobile: Option<&str>) -> bool {
    surveys.iter().any(|survey| {
        email == Some(survey.email_id.as_str()) || mobile == Some(survey.mobile_number.as_str())
    })
}

#[async_trait]
impl Store for MemoryStore {
    async fn survey_identity_exists(
        &self,
        email: Option<&str>,
        mobile: Option<&str>,
    ) -> Result<bool, StoreError> {
        let collections = self.collections.lock().await;
        Ok(identity_taken(&collections.surveys, email, mobile))
    }

    async fn next_trn(&self) -> Result<Trn, StoreError> {
        let mut collections = self.collections.lock().await;

        let last = collections
            .surveys
            .iter()
            .filter_map(|survey| survey.trn.parse::<Trn>().ok())
            .max()
            .max(collections.reserved_trn);

        let trn = Trn::after(last).ok_or(StoreError::TrnExhausted)?;

        collections.reserved_trn = Some(trn);
        Ok(trn)
    }

    async fn insert_survey(&self, response: &SurveyResponse) -> Result<(), StoreError> {
        let mut collections = self.collections.lock().await;

        if identity_taken(
            &collections.surveys,
            Some(response.email_id.as_str()),
            Some(response.mobile_number.as_str()),
        ) {
            return Err(StoreError::DuplicateIdentity);
        }

        collections.surveys.push(response.clone());
        Ok(())
    }

    async fn insert_contact(&self, message: &ContactMessage) -> Result<(), StoreError> {
        self.collections.lock().await.contacts.push(message.clone());
        Ok(())
    }

    async fn insert_subscription(&self, subscription: &Subscription) -> Result<bool, StoreError> {
        let mut collections = self.collections.lock().await;

        if collections.subscriptions.contains_key(&subscription.email) {
            return Ok(false);
        }

        collections
            .subscriptions
            .insert(subscription.email.clone(), subscription.clone());
        Ok(true)
    }
}
