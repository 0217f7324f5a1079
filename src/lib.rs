//! BFF gateway: gates requests on the identity service and relays auth/posts
//! calls to the identity and content services.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
