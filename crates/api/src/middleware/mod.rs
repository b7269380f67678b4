//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated account from a JWT.
//! - [`rbac::RequireCreator`] -- Requires the `creator` role.
//! - [`rbac::RequireAudience`] -- Requires the `audience` role.

pub mod auth;
pub mod rbac;
