use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    account, contact,
    error::AppError,
    models::Notice,
    state::AppState,
    subscription::{self, Subscribed},
    survey,
    utils::FormFields,
};

pub async fn survey_handler(
    State(state): State<Arc<AppState>>,
    fields: FormFields,
) -> Result<Json<Notice>, AppError> {
    let trn = survey::intake(state.store.as_ref(), &fields).await?;

    Ok(Json(Notice::success(survey::SUBMITTED).with_trn(trn)))
}

pub async fn contact_handler(
    State(state): State<Arc<AppState>>,
    fields: FormFields,
) -> Result<Json<Notice>, AppError> {
    contact::send(state.store.as_ref(), &fields).await?;

    Ok(Json(Notice::success(contact::SENT)))
}

pub async fn subscribe_handler(
    State(state): State<Arc<AppState>>,
    fields: FormFields,
) -> Result<Json<Notice>, AppError> {
    let notice = match subscription::subscribe(state.store.as_ref(), &fields).await? {
        Subscribed::New => Notice::success(subscription::SUBSCRIBED),
        Subscribed::Existing => Notice::info(subscription::ALREADY_SUBSCRIBED),
    };

    Ok(Json(notice))
}

pub async fn register_handler() -> Response {
    account::register().into_response()
}

pub async fn login_handler(fields: FormFields) -> Response {
    account::login(&fields).into_response()
}

pub async fn health_handler() -> StatusCode {
    StatusCode::OK
}

pub async fn not_found_handler() -> AppError {
    AppError::NotFound
}
