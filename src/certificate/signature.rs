use base64::{Engine as _, engine::general_purpose};

use super::CertificateError;

pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decodes a signature canvas export (`data:image/png;base64,...`) into PNG bytes.
pub fn decode_png_data_uri(data_uri: &str) -> Result<Vec<u8>, CertificateError> {
    let payload = data_uri
        .strip_prefix(PNG_DATA_URI_PREFIX)
        .ok_or(CertificateError::InvalidSignature("not a PNG data URI"))?;

    let bytes = general_purpose::STANDARD
        .decode(payload)
        .map_err(|_| CertificateError::InvalidSignature("payload is not base64"))?;

    if !bytes.starts_with(&PNG_MAGIC) {
        return Err(CertificateError::InvalidSignature("payload is not a PNG image"));
    }

    Ok(bytes)
}

/// Whether `data_uri` holds a drawn signature that can be embedded in a certificate.
pub fn is_usable(data_uri: &str) -> bool {
    decode_png_data_uri(data_uri).is_ok()
}
