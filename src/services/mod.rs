pub mod analytics_calculator;
pub mod analytics_collector;
pub mod analytics_service;
pub mod error;
pub mod events_service;
pub mod feedbacks_service;
