pub mod analytics;
pub mod clubs;
pub mod events;
pub mod feedbacks;

pub use analytics::AnalyticsData;
pub use clubs::TopClubRow;
pub use events::{CategoryCountRow, EventRow, EventView};
pub use feedbacks::{FeedbackItem, FeedbackRow};
