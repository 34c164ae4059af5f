use axum::{
    Form, Router,
    extract::{Query, RawQuery, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;

use super::views::{self, VerifyOutcome};
use crate::certificate::{
    CertificateForm, CertificateRecord,
    export::{self, Theme},
    qr,
};
use crate::repositories::CertificateRepository;
use crate::state::AppState;

pub fn create_route() -> Router<AppState> {
    Router::new()
        .route("/", get(form_page))
        .route("/certificates/generate", post(generate_certificate))
        .route("/certificate", get(show_certificate))
        .route("/certificate/download", get(download_certificate))
        .route("/certificate/print", get(print_certificate))
        .route("/verify", get(verify_certificate))
}

fn not_found(theme: &Theme) -> Response {
    (StatusCode::NOT_FOUND, Html(views::not_found_page(theme))).into_response()
}

fn decode_record(query: Option<&str>) -> Option<CertificateRecord> {
    query.and_then(CertificateRecord::from_query_str)
}

pub async fn form_page(State(state): State<AppState>) -> Html<String> {
    let theme = Theme::from_config(&state.config);
    Html(views::form_page(
        &theme,
        &state.config.organization_name,
        &CertificateForm::default(),
        None,
    ))
}

/// Validates the registration form and navigates to the certificate view.
pub async fn generate_certificate(
    State(state): State<AppState>,
    Form(form): Form<CertificateForm>,
) -> Response {
    match form.clone().issue(&state.config.verify_base_url) {
        Ok(record) => {
            tracing::info!(
                certificate_id = %record.id,
                registration_number = %record.registration_number,
                "Certificate generated"
            );
            Redirect::to(&format!("/certificate?{}", record.to_query_string())).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Certificate submission refused");
            // The signature pad cannot be refilled, so it starts blank again
            let values = CertificateForm {
                signature: String::new(),
                ..form
            };
            let theme = Theme::from_config(&state.config);
            let page = views::form_page(
                &theme,
                &state.config.organization_name,
                &values,
                Some(&err.to_string()),
            );
            (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response()
        }
    }
}

pub async fn show_certificate(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let theme = Theme::from_config(&state.config);
    let Some(record) = decode_record(query.as_deref()) else {
        return not_found(&theme);
    };

    let qr_svg = qr::render_svg_or_blank(&record.qr_code, state.config.qr_size);
    let page = views::certificate_page(
        &record,
        &theme,
        &state.config.organization_name,
        &record.to_query_string(),
        qr_svg.as_deref(),
        state.config.qr_size,
    );
    Html(page).into_response()
}

pub async fn download_certificate(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let theme = Theme::from_config(&state.config);
    let Some(record) = decode_record(query.as_deref()) else {
        return not_found(&theme);
    };

    let image = export::render_certificate_svg(
        &record,
        &theme,
        &state.config.organization_name,
        state.config.qr_size,
    );
    let disposition = format!(r#"attachment; filename="{}""#, export::file_name(&record));

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        image,
    )
        .into_response()
}

pub async fn print_certificate(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Response {
    let theme = Theme::from_config(&state.config);
    let Some(record) = decode_record(query.as_deref()) else {
        return not_found(&theme);
    };

    let image = export::render_certificate_svg(
        &record,
        &theme,
        &state.config.organization_name,
        state.config.qr_size,
    );
    Html(views::print_page(&qr::svg_data_uri(&image))).into_response()
}

#[derive(Debug, Deserialize)]
pub struct VerifyParams {
    pub reg: Option<String>,
}

/// Looks the registration number up among persisted certificates.
pub async fn verify_certificate(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> Response {
    let theme = Theme::from_config(&state.config);
    let Some(registration) = params.reg.filter(|reg| !reg.trim().is_empty()) else {
        let page = views::verify_page(&theme, VerifyOutcome::MissingRegistration);
        return (StatusCode::BAD_REQUEST, Html(page)).into_response();
    };

    let certificates = match CertificateRepository::new(&state.db)
        .find_by_registration_number(&registration)
        .await
    {
        Ok(certificates) => certificates,
        Err(err) => {
            tracing::error!(error = %err, registration = %registration, "Verification lookup failed");
            let page = views::verify_page(&theme, VerifyOutcome::Unavailable);
            return (StatusCode::INTERNAL_SERVER_ERROR, Html(page)).into_response();
        }
    };

    if certificates.is_empty() {
        let page = views::verify_page(&theme, VerifyOutcome::NotFound(&registration));
        return (StatusCode::NOT_FOUND, Html(page)).into_response();
    }

    Html(views::verify_page(&theme, VerifyOutcome::Verified(&certificates))).into_response()
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;

    use crate::certificate::record::TRANSPORT_KEYS;
    use crate::certificate::signature::tests::png_data_uri;
    use crate::test_utils::{body_string, send, test_app, test_app_with_broken_store};

    fn form_body(signature: &str, full_name: &str) -> String {
        [
            ("registrationNumber", "SDSAN 0042/B"),
            ("fullName", full_name),
            ("emailAddress", "ada@example.org"),
            ("courseCompleted", "Spatial Statistics & R"),
            ("levelCompleted", "5"),
            ("signature", signature),
        ]
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
    }

    fn post_form(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/certificates/generate")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_valid_submission_redirects_to_certificate() {
        let app = test_app().await;
        let response = send(&app, post_form(form_body(&png_data_uri(), "Ada Lovelace"))).await;

        assert_eq!(response.status(), 303);
        let location = response.headers()["location"].to_str().unwrap().to_string();
        assert!(location.starts_with("/certificate?id="));

        let page = send(&app, get(&location)).await;
        assert_eq!(page.status(), 200);
        let html = body_string(page).await;
        assert!(html.contains("Ada Lovelace"));
        assert!(html.contains("Spatial Statistics &amp; R"));
        assert!(html.contains("Verification QR code"));
        assert!(html.contains("/verify?reg=SDSAN%200042%2FB"));
    }

    #[tokio::test]
    async fn test_incomplete_submission_stays_on_form() {
        let app = test_app().await;

        for body in [form_body("", "Ada Lovelace"), form_body(&png_data_uri(), "")] {
            let response = send(&app, post_form(body)).await;
            assert_eq!(response.status(), 422);
            assert!(response.headers().get("location").is_none());
            let html = body_string(response).await;
            assert!(html.contains("Please fill in all fields and draw your signature."));
        }
    }

    #[tokio::test]
    async fn test_certificate_with_missing_key_is_not_found() {
        let app = test_app().await;
        let response = send(&app, post_form(form_body(&png_data_uri(), "Ada Lovelace"))).await;
        let location = response.headers()["location"].to_str().unwrap().to_string();
        let query = location.trim_start_matches("/certificate?");

        for missing in TRANSPORT_KEYS {
            let partial = query
                .split('&')
                .filter(|pair| !pair.starts_with(&format!("{missing}=")))
                .collect::<Vec<_>>()
                .join("&");
            let response = send(&app, get(&format!("/certificate?{partial}"))).await;
            assert_eq!(response.status(), 404, "without {missing}");
            let html = body_string(response).await;
            assert!(html.contains("Certificate Not Found"));
            assert!(!html.contains("Ada Lovelace"));
        }

        let response = send(&app, get("/certificate")).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_download_returns_svg_attachment() {
        let app = test_app().await;
        let response = send(&app, post_form(form_body(&png_data_uri(), "Ada Lovelace"))).await;
        let location = response.headers()["location"].to_str().unwrap().to_string();
        let query = location.trim_start_matches("/certificate?");

        let response = send(&app, get(&format!("/certificate/download?{query}"))).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "image/svg+xml");
        assert_eq!(
            response.headers()["content-disposition"],
            r#"attachment; filename="certificate-SDSAN_0042_B.svg""#
        );
        assert!(body_string(response).await.starts_with("<svg"));

        let response = send(&app, get(&format!("/certificate/print?{query}"))).await;
        assert_eq!(response.status(), 200);
        assert!(body_string(response).await.contains("window.print()"));

        let response = send(&app, get("/certificate/download?id=1")).await;
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_verify_requires_registration_number() {
        let app = test_app().await;
        assert_eq!(send(&app, get("/verify")).await.status(), 400);
        assert_eq!(send(&app, get("/verify?reg=UNKNOWN")).await.status(), 404);
    }

    #[tokio::test]
    async fn test_verify_lookup_failure_stays_html() {
        let app = test_app_with_broken_store().await;
        let response = send(&app, get("/verify?reg=SDSAN-0042")).await;

        assert_eq!(response.status(), 500);
        assert!(
            response.headers()["content-type"]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let html = body_string(response).await;
        assert!(html.contains("Verification unavailable"));
        assert!(!html.contains(r#"{"error""#));
    }

    #[tokio::test]
    async fn test_form_page_renders() {
        let app = test_app().await;
        let response = send(&app, get("/")).await;
        assert_eq!(response.status(), 200);
        assert!(body_string(response).await.contains("Registration Form"));
    }
}
