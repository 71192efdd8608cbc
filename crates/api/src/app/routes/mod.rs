pub mod auth;
pub mod categories;
pub mod common;
pub mod orders;
pub mod products;
pub mod ratings;
pub mod system;
