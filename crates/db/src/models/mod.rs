//! Row models and request DTOs, one module per table group.

pub mod activity_log;
pub mod bottle;
pub mod cellar;
pub mod insight;
