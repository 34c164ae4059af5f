use utoipa::OpenApi;

use crate::routes::certificates::{dto, route};

#[derive(OpenApi)]
#[openapi(
    paths(route::create_certificate, route::get_certificate),
    components(schemas(
        dto::CreateCertificateRequest,
        dto::CreateCertificateResponse,
        dto::CertificateResponse,
        dto::ErrorResponse,
    )),
    tags(
        (name = "Certificates", description = "Persisted certificate records")
    )
)]
pub struct ApiDoc;
