//! Domain types and rules shared by the database and API crates.
//!
//! Nothing in here touches I/O: status literals, date parsing, pagination
//! clamping and the error taxonomy are all plain functions so they can be
//! unit-tested without a database.

pub mod error;
pub mod pagination;
pub mod task;
pub mod types;
pub mod validation;
