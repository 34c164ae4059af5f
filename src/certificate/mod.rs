//! Certificate records: assembly from the registration form, the query-string
//! transport between form and view, QR encoding and image export.

pub mod export;
pub mod form;
pub mod qr;
pub mod record;
pub mod signature;

pub use form::CertificateForm;
pub use record::CertificateRecord;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CertificateError {
    #[error("Please fill in all fields and draw your signature.")]
    SubmissionIncomplete,

    #[error("invalid signature image: {0}")]
    InvalidSignature(&'static str),

    #[error("issue date {0} cannot be extended by the validity period")]
    DateOutOfRange(chrono::NaiveDate),

    #[error("QR code generation failed: {0}")]
    Qr(#[from] qrcode::types::QrError),
}
