//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO (all `Option` fields) for patches where the entity is editable
//!
//! Entities serialize with camelCase keys, which is what the web client reads.

pub mod audience;
pub mod campaign;
pub mod campaign_update;
pub mod content;
pub mod contribution;
pub mod creator;
pub mod follower;
pub mod reward;
pub mod subscription;
