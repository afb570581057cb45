use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::interest::Interest;

/// Check or uncheck one interest on the selection page
///
/// `interest` is a feature key such as `creative_writing`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToggleInterestRequest {
    #[validate(length(min = 1))]
    pub interest: String,
    #[serde(default = "default_selected")]
    pub selected: bool,
}

fn default_selected() -> bool {
    true
}

/// Session-less recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecommendRequest {
    #[validate(length(max = 59))]
    #[serde(default)]
    pub interests: Vec<Interest>,
}
