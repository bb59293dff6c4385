//! Request handlers, one module per resource.

pub mod category;
pub mod task;
pub mod user;
