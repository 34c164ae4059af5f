use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Query-string keys of the navigation contract, in encoding order.
pub const TRANSPORT_KEYS: [&str; 10] = [
    "id",
    "date",
    "expiryDate",
    "registrationNumber",
    "fullName",
    "emailAddress",
    "courseCompleted",
    "levelCompleted",
    "signature",
    "qrCode",
];

/// One issued certificate as carried from the form to the certificate view.
///
/// Every attribute is required and non-empty; a record with a blank field is
/// never constructed by [`CertificateRecord::from_query_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRecord {
    pub id: String,
    pub date: String,
    pub expiry_date: String,
    pub registration_number: String,
    pub full_name: String,
    pub email_address: String,
    pub course_completed: String,
    pub level_completed: String,
    pub signature: String,
    pub qr_code: String,
}

impl CertificateRecord {
    fn fields(&self) -> [(&'static str, &str); 10] {
        [
            ("id", &self.id),
            ("date", &self.date),
            ("expiryDate", &self.expiry_date),
            ("registrationNumber", &self.registration_number),
            ("fullName", &self.full_name),
            ("emailAddress", &self.email_address),
            ("courseCompleted", &self.course_completed),
            ("levelCompleted", &self.level_completed),
            ("signature", &self.signature),
            ("qrCode", &self.qr_code),
        ]
    }

    /// Encodes the record into a query string. This is the only encoding
    /// pass: field values are stored as plain text everywhere else.
    pub fn to_query_string(&self) -> String {
        self.fields()
            .iter()
            .map(|(key, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(key),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Decodes a raw query string (without the leading `?`).
    ///
    /// Returns `None` unless all ten keys are present with non-empty values.
    pub fn from_query_str(query: &str) -> Option<Self> {
        let mut params = HashMap::new();
        for pair in query.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode_component(key), decode_component(value))
            else {
                tracing::debug!(pair, "Skipping undecodable query pair");
                continue;
            };
            params.insert(key, value);
        }
        Self::from_params(params)
    }

    /// Builds a record from already-decoded parameters.
    pub fn from_params(mut params: HashMap<String, String>) -> Option<Self> {
        let mut take = |key: &str| params.remove(key).filter(|value| !value.is_empty());

        Some(Self {
            id: take("id")?,
            date: take("date")?,
            expiry_date: take("expiryDate")?,
            registration_number: take("registrationNumber")?,
            full_name: take("fullName")?,
            email_address: take("emailAddress")?,
            course_completed: take("courseCompleted")?,
            level_completed: take("levelCompleted")?,
            signature: take("signature")?,
            qr_code: take("qrCode")?,
        })
    }
}

fn decode_component(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|value| value.into_owned())
}
