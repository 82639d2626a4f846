use chrono::Utc;
use tracing::info;

use crate::{
    error::AppError, models::Subscription, store::Store, utils::FormFields,
    validation::validate_email,
};

pub const EMAIL_REQUIRED: &str = "Please enter a valid email address.";
pub const SUBSCRIBED: &str = "Successfully subscribed.";
pub const ALREADY_SUBSCRIBED: &str = "You are already subscribed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscribed {
    New,
    Existing,
}

pub async fn subscribe(store: &dyn Store, fields: &FormFields) -> Result<Subscribed, AppError> {
    let email = fields
        .owned("email")
        .ok_or_else(|| AppError::bad_input(EMAIL_REQUIRED))?;

    validate_email(&email)?;

    let subscription = Subscription {
        email,
        created_at: Utc::now(),
    };

    let inserted = store
        .insert_subscription(&subscription)
        .await
        .map_err(|e| AppError::from_store("Error subscribing", e))?;

    if inserted {
        info!("New subscription");
        Ok(Subscribed::New)
    } else {
        Ok(Subscribed::Existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{store::MemoryStore, validation::INVALID_EMAIL};

    fn fields(email: &str) -> FormFields {
        [("email", email)].into_iter().collect()
    }

    #[tokio::test]
    async fn test_subscribe_twice() {
        let store = MemoryStore::new();

        assert_eq!(
            subscribe(&store, &fields("x@y.com")).await.unwrap(),
            Subscribed::New
        );
        assert_eq!(
            subscribe(&store, &fields("x@y.com")).await.unwrap(),
            Subscribed::Existing
        );
        assert_eq!(store.subscriptions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rejects_bad_email() {
        let store = MemoryStore::new();

        let error = subscribe(&store, &fields("x@y")).await.unwrap_err();
        assert_eq!(error.to_string(), INVALID_EMAIL);

        let error = subscribe(&store, &fields("")).await.unwrap_err();
        assert_eq!(error.to_string(), EMAIL_REQUIRED);

        assert!(store.subscriptions().await.is_empty());
    }
}
