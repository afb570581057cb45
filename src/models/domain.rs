use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::models::interest::Interest;

/// Descriptive bundle for one course
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseRecord {
    pub course: String,
    #[serde(rename = "topCareers")]
    pub top_careers: String,
    #[serde(rename = "highestPosition")]
    pub highest_position: String,
    #[serde(rename = "avgSalary")]
    pub avg_salary: String,
    #[serde(rename = "socialRespect")]
    pub social_respect: String,
}

/// Interests currently checked by one session.
///
/// Iteration follows catalog order.
pub type SelectionSet = BTreeSet<Interest>;

/// Binary vector aligned to the model's feature columns
pub type FeatureVector = Vec<u8>;

/// Active page of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Welcome,
    SelectInterests,
    Results,
}

impl Default for Page {
    fn default() -> Self {
        Page::Welcome
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Page::Welcome => "welcome",
            Page::SelectInterests => "select_interests",
            Page::Results => "results",
        };
        f.write_str(name)
    }
}

/// Course suggested for a single selected interest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestSuggestion {
    pub interest: Interest,
    pub label: String,
    pub course: CourseRecord,
}

/// Output of the recommendation engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "bestMatch")]
    pub best_match: CourseRecord,
    #[serde(rename = "perInterest")]
    pub per_interest: Vec<InterestSuggestion>,
}

/// Hyperparameters of the random forest
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    pub seed: u64,
    pub balanced: bool,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 15,
            min_samples_split: 2,
            seed: 42,
            balanced: true,
        }
    }
}
