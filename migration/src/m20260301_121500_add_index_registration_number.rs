use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Verification looks certificates up by registration number
        manager
            .create_index(
                Index::create()
                    .name("idx_certificate_registration_number")
                    .table(Certificate::Table)
                    .col(Certificate::RegistrationNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_certificate_registration_number")
                    .table(Certificate::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Certificate {
    Table,
    RegistrationNumber,
}
