//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod broadcaster;
pub mod pricing;
pub mod rights_event;
pub mod rights_package;
pub mod sport_event;
pub mod territory;
pub mod workflow_job;
