//! Domain rules shared by the database and API layers.
//!
//! Everything in this crate is pure: no I/O, no database access. Handlers
//! and repositories call into these functions so the funding arithmetic and
//! status rules live in exactly one place.

pub mod access;
pub mod campaign_status;
pub mod error;
pub mod funding;
pub mod payments;
pub mod roles;
pub mod subscription;
pub mod types;
pub mod uploads;
pub mod validation;
