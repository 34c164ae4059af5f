pub mod html;
pub mod tracing;
