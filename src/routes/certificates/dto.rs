use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::certificate::CertificateRecord;
use crate::entities::certificate;
use crate::error::AppError;
use crate::repositories::NewCertificate;

/// Keys the create endpoint requires, in the order missing ones are reported.
pub const REQUIRED_FIELDS: [&str; 10] = [
    "id",
    "fullName",
    "email",
    "course",
    "level",
    "signature",
    "registrationNumber",
    "date",
    "qrCode",
    "expiryDate",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCertificateRequest {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub course: String,
    pub level: String,
    /// PNG data URI
    pub signature: String,
    pub registration_number: String,
    pub date: String,
    pub qr_code: String,
    pub expiry_date: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCertificateResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CertificateResponse {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub course: String,
    pub level: String,
    pub signature: String,
    pub registration_number: String,
    pub date: String,
    pub qr_code: String,
    pub expiry_date: String,
    pub created_at: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// JavaScript truthiness: absent, `null`, `false`, `0` and `""` are falsy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

pub fn missing_fields(body: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|field| !is_truthy(body.get(*field)))
        .collect()
}

fn text_field(body: &Map<String, Value>, field: &str) -> Result<String, AppError> {
    match body.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        _ => Err(AppError::BadRequest(format!(
            "Invalid certificate payload: `{field}` must be a string"
        ))),
    }
}

impl CreateCertificateRequest {
    /// Reads a request out of a JSON object, reporting every missing field at once.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, AppError> {
        let missing = missing_fields(body);
        if !missing.is_empty() {
            return Err(AppError::MissingFields(missing));
        }

        Ok(Self {
            id: text_field(body, "id")?,
            full_name: text_field(body, "fullName")?,
            email: text_field(body, "email")?,
            course: text_field(body, "course")?,
            level: text_field(body, "level")?,
            signature: text_field(body, "signature")?,
            registration_number: text_field(body, "registrationNumber")?,
            date: text_field(body, "date")?,
            qr_code: text_field(body, "qrCode")?,
            expiry_date: text_field(body, "expiryDate")?,
        })
    }
}

impl From<CertificateRecord> for CreateCertificateRequest {
    fn from(record: CertificateRecord) -> Self {
        Self {
            id: record.id,
            full_name: record.full_name,
            email: record.email_address,
            course: record.course_completed,
            level: record.level_completed,
            signature: record.signature,
            registration_number: record.registration_number,
            date: record.date,
            qr_code: record.qr_code,
            expiry_date: record.expiry_date,
        }
    }
}

impl From<CreateCertificateRequest> for NewCertificate {
    fn from(request: CreateCertificateRequest) -> Self {
        Self {
            id: request.id,
            full_name: request.full_name,
            email: request.email,
            course: request.course,
            level: request.level,
            signature: request.signature,
            registration_number: request.registration_number,
            date: request.date,
            qr_code: request.qr_code,
            expiry_date: request.expiry_date,
        }
    }
}

impl From<certificate::Model> for CertificateResponse {
    fn from(model: certificate::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            course: model.course,
            level: model.level,
            signature: model.signature,
            registration_number: model.registration_number,
            date: model.date,
            qr_code: model.qr_code,
            expiry_date: model.expiry_date,
            created_at: model.created_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_missing_fields_follow_required_order() {
        let body = object(json!({
            "id": "x",
            "fullName": "Ada",
            "email": "ada@example.org",
            "level": "2",
            "registrationNumber": "R1",
            "date": "3/7/2026",
            "qrCode": "https://certs.example.org/verify?reg=R1",
            "expiryDate": "3/7/2028",
        }));
        assert_eq!(missing_fields(&body), vec!["course", "signature"]);
    }

    #[test]
    fn test_falsy_values_count_as_missing() {
        let body = object(json!({
            "id": "",
            "fullName": null,
            "email": false,
            "course": 0,
            "level": 3,
            "signature": "data:image/png;base64,AAAA",
            "registrationNumber": "R1",
            "date": "d",
            "qrCode": "q",
            "expiryDate": "e",
        }));
        assert_eq!(missing_fields(&body), vec!["id", "fullName", "email", "course"]);
    }

    #[test]
    fn test_from_json_accepts_numeric_level() {
        let mut body = object(json!({
            "id": "x", "fullName": "Ada", "email": "a@b.c", "course": "GIS",
            "signature": "s", "registrationNumber": "R1", "date": "d",
            "qrCode": "q", "expiryDate": "e",
        }));
        body.insert("level".to_string(), json!(4));

        let request = CreateCertificateRequest::from_json(&body).unwrap();
        assert_eq!(request.level, "4");
    }

    #[test]
    fn test_from_json_rejects_non_text_values() {
        let body = object(json!({
            "id": "x", "fullName": ["Ada"], "email": "a@b.c", "course": "GIS",
            "level": "1", "signature": "s", "registrationNumber": "R1", "date": "d",
            "qrCode": "q", "expiryDate": "e",
        }));
        let err = CreateCertificateRequest::from_json(&body).unwrap_err();
        assert!(err.to_string().contains("`fullName` must be a string"));
    }

    #[test]
    fn test_record_maps_onto_persisted_names() {
        let record = CertificateRecord {
            id: "id".into(),
            date: "d".into(),
            expiry_date: "e".into(),
            registration_number: "R1".into(),
            full_name: "Ada".into(),
            email_address: "ada@example.org".into(),
            course_completed: "GIS".into(),
            level_completed: "1".into(),
            signature: "s".into(),
            qr_code: "q".into(),
        };
        let request = CreateCertificateRequest::from(record);
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["email"], "ada@example.org");
        assert_eq!(json["course"], "GIS");
        assert_eq!(json["level"], "1");
        assert_eq!(missing_fields(json.as_object().unwrap()), Vec::<&str>::new());
    }
}
