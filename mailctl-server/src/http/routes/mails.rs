//! Mail endpoints
//!
//! - POST   /mails/      create
//! - GET    /mails/{id}  read
//! - PATCH  /mails/{id}  partial update
//! - DELETE /mails/{id}  delete

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::{ValidJson, ValidMailId};
use crate::http::server::AppState;
use crate::models::{Mail, MailPatch, NewMail};

/// Status string returned by a successful delete. Existing clients match on
/// this exact spelling.
pub const DELETED_STATUS: &str = "succes";

/// Create response
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i32,
}

/// Read response
#[derive(Debug, Serialize)]
pub struct MailSummary {
    pub header: String,
    pub date_creation: String,
}

impl From<Mail> for MailSummary {
    fn from(m: Mail) -> Self {
        Self {
            header: m.header,
            date_creation: m.date_creation.to_rfc3339(),
        }
    }
}

/// Patch response
#[derive(Debug, Serialize)]
pub struct PatchedResponse {
    pub header: String,
    pub description: String,
    pub id: i32,
}

impl From<Mail> for PatchedResponse {
    fn from(m: Mail) -> Self {
        Self {
            header: m.header,
            description: m.description,
            id: m.id,
        }
    }
}

/// Delete response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// POST /mails/ - create a mail
async fn create_mail(
    State(state): State<Arc<AppState>>,
    ValidJson(mail): ValidJson<NewMail>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let mail = state.store.create(mail).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: mail.id })))
}

/// GET /mails/{id} - read a mail
async fn get_mail(
    State(state): State<Arc<AppState>>,
    ValidMailId(id): ValidMailId,
) -> Result<Json<MailSummary>, ApiError> {
    let mail = state.store.get(id).await?;
    Ok(Json(MailSummary::from(mail)))
}

/// PATCH /mails/{id} - update header and/or description
async fn patch_mail(
    State(state): State<Arc<AppState>>,
    ValidMailId(id): ValidMailId,
    ValidJson(patch): ValidJson<MailPatch>,
) -> Result<Json<PatchedResponse>, ApiError> {
    let mail = state.store.update(id, &patch).await?;
    Ok(Json(PatchedResponse::from(mail)))
}

/// DELETE /mails/{id} - delete a mail
async fn delete_mail(
    State(state): State<Arc<AppState>>,
    ValidMailId(id): ValidMailId,
) -> Result<Json<StatusResponse>, ApiError> {
    state.store.delete(id).await?;
    Ok(Json(StatusResponse {
        status: DELETED_STATUS,
    }))
}

/// Mail routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/mails/", post(create_mail))
        .route("/mails", post(create_mail))
        .route(
            "/mails/{id}",
            get(get_mail).patch(patch_mail).delete(delete_mail),
        )
}
