use std::sync::Arc;

use crate::engine::dataset::CourseInfo;
use crate::engine::model::TrainedModel;
use crate::error::AppError;
use crate::models::{CourseRecord, FeatureVector, Interest, InterestSuggestion, Recommendation, SelectionSet};

/// Fewest interests a user must pick before recommendations are shown
pub const MIN_SELECTION: usize = 2;

/// Vector with a 1 at every column whose interest is selected
pub fn encode_selection(columns: &[Interest], selected: &SelectionSet) -> FeatureVector {
    columns
        .iter()
        .map(|column| u8::from(selected.contains(column)))
        .collect()
}

/// Vector with a single 1 at the column of `interest`.
///
/// All zeros if the dataset has no column for it.
pub fn encode_single(columns: &[Interest], interest: Interest) -> FeatureVector {
    columns
        .iter()
        .map(|&column| u8::from(column == interest))
        .collect()
}

/// Reject selections below [`MIN_SELECTION`]
pub fn ensure_min_selection(selected: &SelectionSet) -> Result<(), AppError> {
    if selected.len() < MIN_SELECTION {
        return Err(AppError::InsufficientSelection {
            selected: selected.len(),
            required: MIN_SELECTION,
        });
    }
    Ok(())
}

/// Turns selections into course recommendations
#[derive(Debug, Clone)]
pub struct Recommender {
    model: Arc<TrainedModel>,
    course_info: Arc<CourseInfo>,
}

impl Recommender {
    pub fn new(model: Arc<TrainedModel>, course_info: Arc<CourseInfo>) -> Self {
        Self { model, course_info }
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    pub fn course_info(&self) -> &CourseInfo {
        &self.course_info
    }

    /// Best overall course plus one suggestion per selected interest.
    ///
    /// Callers must have checked `selected.len() >= MIN_SELECTION` with
    /// [`ensure_min_selection`]; it is not re-checked here.
    pub fn recommend(&self, selected: &SelectionSet) -> Result<Recommendation, AppError> {
        let columns = self.model.feature_columns();

        let combined = encode_selection(columns, selected);
        let best_match = self.lookup(self.model.predict(&combined)?)?;

        let per_interest = selected
            .iter()
            .map(|&interest| {
                let vector = encode_single(columns, interest);
                let course = self.lookup(self.model.predict(&vector)?)?;
                Ok(InterestSuggestion {
                    interest,
                    label: interest.label().to_string(),
                    course,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        tracing::debug!(
            "Recommended '{}' for {} interests",
            best_match.course,
            selected.len()
        );

        Ok(Recommendation {
            best_match,
            per_interest,
        })
    }

    fn lookup(&self, course: &str) -> Result<CourseRecord, AppError> {
        self.course_info
            .get(course)
            .cloned()
            .ok_or_else(|| AppError::UnknownCourseLabel(course.to_string()))
    }
}
