pub mod route;
pub mod views;

pub use route::create_route;
