pub mod auth;
pub mod factory;
pub mod posts;
pub mod upstream;
