use base64::{Engine as _, engine::general_purpose};
use qrcode::{QrCode, render::svg};

use super::CertificateError;

/// Builds the verification link a certificate's QR code points at.
///
/// The registration number is escaped as a URL component so the link stays
/// a valid URL; the link itself is plain text until the record is encoded
/// for transport.
pub fn verification_link(base_url: &str, registration_number: &str) -> String {
    format!(
        "{}/verify?reg={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(registration_number)
    )
}

/// Encodes `payload` into a `size`x`size` black-on-white SVG matrix.
pub fn render_svg(payload: &str, size: u32) -> Result<String, CertificateError> {
    let code = QrCode::new(payload.as_bytes())?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .max_dimensions(size, size)
        .quiet_zone(false)
        .dark_color(svg::Color("#000000"))
        .light_color(svg::Color("#ffffff"))
        .build();
    Ok(image)
}

/// Like [`render_svg`], but a failure only leaves the QR area blank.
pub fn render_svg_or_blank(payload: &str, size: u32) -> Option<String> {
    match render_svg(payload, size) {
        Ok(image) => Some(image),
        Err(err) => {
            tracing::error!(error = %err, payload_len = payload.len(), "QR code generation failed");
            None
        }
    }
}

pub fn svg_data_uri(svg: &str) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        general_purpose::STANDARD.encode(svg)
    )
}
