//! `SeaORM` Entities

pub mod certificate;
