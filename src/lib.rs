//! Course Compass - interest-based course and career recommendations
//!
//! A random forest is trained once on a course dataset whose feature columns
//! are interest flags. Users walk through a three-page flow (welcome,
//! interest selection, results) and receive a best-matching course plus one
//! suggestion per selected interest.

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use engine::{Dataset, Recommender, Session, TrainedModel};
pub use error::AppError;
pub use models::{CourseRecord, ForestParams, Interest, Page, PageView, Recommendation, SelectionSet};
