use crate::api_docs::ApiDoc;
use crate::middleware::http_logger::http_logger;
use crate::routes;
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use http::header;
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    ServiceBuilderExt,
    cors::{AllowOrigin, Any, CorsLayer},
    propagate_header::PropagateHeaderLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

fn cors_layer(allowed: &str) -> CorsLayer {
    let allowed_headers = [header::CONTENT_TYPE, header::ACCEPT, header::ACCEPT_LANGUAGE];
    let allowed_methods = [http::Method::GET, http::Method::POST, http::Method::OPTIONS];

    if allowed == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
    } else {
        let allowed_origins: HashSet<String> = allowed
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let origins: Vec<http::HeaderValue> = allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(allowed_methods)
            .allow_headers(allowed_headers)
    }
}

pub async fn create_app(state: AppState) -> anyhow::Result<Router> {
    let mut router = Router::new()
        .merge(routes::health::route::create_route())
        .merge(routes::pages::create_route())
        .merge(routes::certificates::create_route());

    if state.config.swagger_enabled {
        let swagger_ui =
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi());
        router = router.merge(swagger_ui);
    }

    // from_fn layers are applied on the router, not inside the ServiceBuilder
    let router = router.layer(middleware::from_fn_with_state(state.clone(), http_logger));

    let sensitive_headers: Arc<[_]> = vec![header::AUTHORIZATION, header::COOKIE].into();
    let middleware = ServiceBuilder::new()
        .layer(cors_layer(&state.config.cors_allowed_origins))
        .layer(PropagateHeaderLayer::new(header::HeaderName::from_static(
            "x-request-id",
        )))
        .sensitive_request_headers(sensitive_headers.clone())
        .sensitive_response_headers(sensitive_headers)
        .compression();

    Ok(router.layer(middleware).with_state(state))
}
