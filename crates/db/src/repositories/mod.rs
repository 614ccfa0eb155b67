//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_log_repo;
pub mod bottle_repo;
pub mod cellar_repo;
pub mod insight_repo;

pub use activity_log_repo::ActivityLogRepo;
pub use bottle_repo::BottleRepo;
pub use cellar_repo::CellarRepo;
pub use insight_repo::InsightRepo;
