// Recommendation engine exports
pub mod catalog;
pub mod dataset;
pub mod flow;
pub mod forest;
pub mod model;
pub mod recommender;

pub use catalog::{catalog, catalog_view, Category};
pub use dataset::{CourseInfo, Dataset};
pub use flow::Session;
pub use forest::{DecisionTree, RandomForest};
pub use model::TrainedModel;
pub use recommender::{encode_selection, encode_single, ensure_min_selection, Recommender, MIN_SELECTION};
