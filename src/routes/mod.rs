pub mod certificates;
pub mod health;
pub mod pages;
