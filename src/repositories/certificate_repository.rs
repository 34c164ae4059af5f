use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};

use crate::entities::certificate;
use crate::error::{AppError, Result};

pub struct NewCertificate {
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
}

pub struct CertificateRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CertificateRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<certificate::Model>> {
        let certificate = certificate::Entity::find_by_id(id.to_owned())
            .one(self.db)
            .await?;
        Ok(certificate)
    }

    pub async fn find_by_registration_number(
        &self,
        registration_number: &str,
    ) -> Result<Vec<certificate::Model>> {
        let certificates = certificate::Entity::find()
            .filter(certificate::Column::RegistrationNumber.eq(registration_number))
            .order_by_desc(certificate::Column::CreatedAt)
            .all(self.db)
            .await?;
        Ok(certificates)
    }

    /// Inserts a certificate. The primary key decides uniqueness, so two
    /// concurrent creates with the same id cannot both succeed.
    pub async fn create(&self, new: NewCertificate) -> Result<certificate::Model> {
        let model = certificate::ActiveModel {
            id: Set(new.id),
            full_name: Set(new.full_name),
            email: Set(new.email),
            course: Set(new.course),
            level: Set(new.level),
            signature: Set(new.signature),
            registration_number: Set(new.registration_number),
            date: Set(new.date),
            qr_code: Set(new.qr_code),
            expiry_date: Set(new.expiry_date),
            created_at: Set(Utc::now().naive_utc()),
        };

        model.insert(self.db).await.map_err(map_insert_error)
    }
}

fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("User with this ID already exists".to_string())
        }
        _ => AppError::Db(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_state;

    fn new_certificate(id: &str, registration_number: &str) -> NewCertificate {
        NewCertificate {
            id: id.to_string(),
            full_name: "Ada Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            course: "Cartography".to_string(),
            level: "3".to_string(),
            signature: "data:image/png;base64,iVBORw0KGgo=".to_string(),
            registration_number: registration_number.to_string(),
            date: "3/7/2026".to_string(),
            qr_code: "https://certs.example.org/verify?reg=R1".to_string(),
            expiry_date: "3/7/2028".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let state = test_state().await;
        let repo = CertificateRepository::new(&state.db);

        let created = repo.create(new_certificate("c-1", "R1")).await.unwrap();
        assert_eq!(created.id, "c-1");

        let found = repo.find_by_id("c-1").await.unwrap().unwrap();
        assert_eq!(found.email, "ada@example.org");
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_id_is_conflict() {
        let state = test_state().await;
        let repo = CertificateRepository::new(&state.db);

        repo.create(new_certificate("c-1", "R1")).await.unwrap();
        let err = repo.create(new_certificate("c-1", "R2")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        // The first row is left untouched
        let found = repo.find_by_id("c-1").await.unwrap().unwrap();
        assert_eq!(found.registration_number, "R1");
    }

    #[tokio::test]
    async fn test_find_by_registration_number() {
        let state = test_state().await;
        let repo = CertificateRepository::new(&state.db);

        repo.create(new_certificate("c-1", "R1")).await.unwrap();
        repo.create(new_certificate("c-2", "R1")).await.unwrap();
        repo.create(new_certificate("c-3", "R2")).await.unwrap();

        assert_eq!(repo.find_by_registration_number("R1").await.unwrap().len(), 2);
        assert!(repo.find_by_registration_number("R9").await.unwrap().is_empty());
    }
}
