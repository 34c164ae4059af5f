use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Certificate::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Certificate::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Certificate::FullName).text().not_null())
                    .col(ColumnDef::new(Certificate::Email).text().not_null())
                    .col(ColumnDef::new(Certificate::Course).text().not_null())
                    .col(ColumnDef::new(Certificate::Level).text().not_null())
                    .col(ColumnDef::new(Certificate::Signature).text().not_null())
                    .col(
                        ColumnDef::new(Certificate::RegistrationNumber)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Certificate::Date).text().not_null())
                    .col(ColumnDef::new(Certificate::QrCode).text().not_null())
                    .col(ColumnDef::new(Certificate::ExpiryDate).text().not_null())
                    .col(
                        ColumnDef::new(Certificate::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Certificate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Certificate {
    Table,
    Id,
    FullName,
    Email,
    Course,
    Level,
    Signature,
    RegistrationNumber,
    Date,
    QrCode,
    ExpiryDate,
    CreatedAt,
}
