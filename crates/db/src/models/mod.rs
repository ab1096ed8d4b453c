//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the writes its repository accepts
//!
//! Enum-valued columns (`stream`, `role`, `status`, `entry_type`) stay
//! `String` on the row structs; the typed enums in `trb-core` are applied at
//! the repository boundary where the values are produced or checked.

pub mod cadet_profile;
pub mod deployment;
pub mod diary;
pub mod training_task;
pub mod vessel;
