use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::{CertificateError, CertificateRecord, qr, signature};
use crate::config::CERTIFICATE_VALIDITY_YEARS;

/// Raw registration form input. `signature` is the signature canvas exported
/// as a PNG data URI, or empty when nothing was drawn.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CertificateForm {
    #[validate(length(min = 1))]
    pub registration_number: String,
    #[validate(length(min = 1))]
    pub full_name: String,
    #[validate(length(min = 1))]
    pub email_address: String,
    #[validate(length(min = 1))]
    pub course_completed: String,
    #[validate(length(min = 1))]
    pub level_completed: String,
    #[validate(custom(function = "validate_signature"))]
    pub signature: String,
}

fn validate_signature(data_uri: &str) -> Result<(), ValidationError> {
    if signature::is_usable(data_uri) {
        Ok(())
    } else {
        Err(ValidationError::new("signature"))
    }
}

impl CertificateForm {
    /// Accepts or refuses the submission as a whole; which field was blank is
    /// deliberately not reported.
    pub fn validate_submission(&self) -> Result<(), CertificateError> {
        self.validate()
            .map_err(|_| CertificateError::SubmissionIncomplete)
    }

    /// Validates and assembles a certificate issued today.
    pub fn issue(self, verify_base_url: &str) -> Result<CertificateRecord, CertificateError> {
        self.validate_submission()?;
        self.into_record(Local::now().date_naive(), Uuid::new_v4(), verify_base_url)
    }

    /// Assembles the record for a given issue date and identifier.
    pub fn into_record(
        self,
        issued_on: NaiveDate,
        id: Uuid,
        verify_base_url: &str,
    ) -> Result<CertificateRecord, CertificateError> {
        let expires_on = expiry_date(issued_on).ok_or(CertificateError::DateOutOfRange(issued_on))?;
        let qr_code = qr::verification_link(verify_base_url, &self.registration_number);

        Ok(CertificateRecord {
            id: id.to_string(),
            date: format_date(issued_on),
            expiry_date: format_date(expires_on),
            registration_number: self.registration_number,
            full_name: self.full_name,
            email_address: self.email_address,
            course_completed: self.course_completed,
            level_completed: self.level_completed,
            signature: self.signature,
            qr_code,
        })
    }
}

/// Issue date plus the validity period, keeping day and month.
/// Feb 29 rolls over to Mar 1 when the target year is not a leap year.
pub fn expiry_date(issued_on: NaiveDate) -> Option<NaiveDate> {
    let year = issued_on.year() + CERTIFICATE_VALIDITY_YEARS;
    issued_on
        .with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

/// Short US-style date, e.g. `3/7/2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
