pub mod audit;
pub mod companies;
pub mod content;
pub mod jobs;
pub mod reports;
pub mod stats;
pub mod users;
