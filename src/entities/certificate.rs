//! `SeaORM` Entity for certificate table

use sea_orm::entity::prelude::*;

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "certificate"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq)]
pub struct Model {
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
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
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

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = String;
    fn auto_increment() -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::String(StringLen::None).def(),
            Self::FullName => ColumnType::Text.def(),
            Self::Email => ColumnType::Text.def(),
            Self::Course => ColumnType::Text.def(),
            Self::Level => ColumnType::Text.def(),
            Self::Signature => ColumnType::Text.def(),
            Self::RegistrationNumber => ColumnType::Text.def(),
            Self::Date => ColumnType::Text.def(),
            Self::QrCode => ColumnType::Text.def(),
            Self::ExpiryDate => ColumnType::Text.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        panic!("No RelationDef")
    }
}

impl ActiveModelBehavior for ActiveModel {}
