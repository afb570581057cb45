// Model exports
pub mod domain;
pub mod interest;
pub mod requests;
pub mod responses;

pub use domain::{CourseRecord, FeatureVector, ForestParams, InterestSuggestion, Page, Recommendation, SelectionSet};
pub use interest::{Interest, UnknownInterest};
pub use requests::{RecommendRequest, ToggleInterestRequest};
pub use responses::{CatalogResponse, CategoryView, ErrorResponse, HealthResponse, InterestOption, ModelSummary, PageView, SessionResponse};
