pub mod credential;
pub mod gate;
pub mod token_service;

pub use credential::Credential;
pub use gate::{AuthGate, AuthorizationDecision, DenyReason};
pub use token_service::{Registration, TokenPair, TokenService};
