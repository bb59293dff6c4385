//! Row structs and write DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - The already-validated input used for inserts and patches

pub mod category;
pub mod task;
pub mod user;
