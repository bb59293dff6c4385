//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod task_repo;
pub mod user_repo;

pub use category_repo::CategoryRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
