pub mod analytics_repo;
pub mod events_repo;
pub mod feedbacks_repo;
pub mod schema;
pub mod timestamp;
