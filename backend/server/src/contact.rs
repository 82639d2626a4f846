use chrono::Utc;
use tracing::info;

use crate::{
    error::AppError, models::ContactMessage, store::Store, utils::FormFields,
    validation::validate_identity,
};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required!";
pub const SENT: &str = "Your message has been sent successfully!";

pub async fn send(store: &dyn Store, fields: &FormFields) -> Result<(), AppError> {
    let (Some(name), Some(email), Some(mobile), Some(message)) = (
        fields.owned("name"),
        fields.owned("email"),
        fields.owned("mobile"),
        fields.owned("message"),
    ) else {
        return Err(AppError::bad_input(ALL_FIELDS_REQUIRED));
    };

    validate_identity(&name, &email, &mobile)?;

    let message = ContactMessage {
        name,
        email,
        mobile,
        message,
        created_at: Utc::now(),
    };

    store
        .insert_contact(&message)
        .await
        .map_err(|e| AppError::from_store("Error sending message", e))?;

    info!("Stored contact message");
    Ok(())
}
