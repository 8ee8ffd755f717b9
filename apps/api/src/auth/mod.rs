// Auth Gate: phone-number sign-up / sign-in against a managed identity provider.
// Input is validated locally before any provider call.

pub mod credentials;
pub mod handlers;
pub mod provider;
pub mod validation;
