pub mod api_docs;
pub mod app;
pub mod certificate;
pub mod config;
pub mod database;
pub mod entities;
pub mod error;
pub mod middleware;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_utils;
