use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use bytes::Bytes;
use serde_json::Value;

use super::dto::{
    CertificateResponse, CreateCertificateRequest, CreateCertificateResponse, ErrorResponse,
};
use crate::error::{AppError, Result};
use crate::repositories::CertificateRepository;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/api", post(create_certificate))
        .route("/api/v1/certificates", post(create_certificate))
        .route("/api/v1/certificates/{id}", get(get_certificate))
}

/// Store a certificate record
#[utoipa::path(
    post,
    path = "/api/v1/certificates",
    request_body = CreateCertificateRequest,
    responses(
        (status = 201, description = "Certificate stored", body = CreateCertificateResponse),
        (status = 400, description = "Missing required fields or malformed body", body = ErrorResponse),
        (status = 409, description = "A certificate with this id already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Certificates"
)]
pub async fn create_certificate(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreateCertificateResponse>)> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
    let Value::Object(fields) = payload else {
        return Err(AppError::BadRequest(
            "Invalid JSON body: expected an object".to_string(),
        ));
    };

    let request = CreateCertificateRequest::from_json(&fields)?;

    let certificate = CertificateRepository::new(&state.db)
        .create(request.into())
        .await?;

    tracing::info!(certificate_id = %certificate.id, "Certificate stored");

    Ok((
        StatusCode::CREATED,
        Json(CreateCertificateResponse { id: certificate.id }),
    ))
}

/// Get a stored certificate by id
#[utoipa::path(
    get,
    path = "/api/v1/certificates/{id}",
    params(
        ("id" = String, Path, description = "Certificate ID")
    ),
    responses(
        (status = 200, description = "Certificate retrieved", body = CertificateResponse),
        (status = 404, description = "Certificate not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Certificates"
)]
pub async fn get_certificate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CertificateResponse>> {
    let certificate = CertificateRepository::new(&state.db)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Certificate not found".to_string()))?;

    Ok(Json(certificate.into()))
}
