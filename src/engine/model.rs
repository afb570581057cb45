use std::time::Instant;

use crate::engine::dataset::Dataset;
use crate::engine::forest::RandomForest;
use crate::error::AppError;
use crate::models::{ForestParams, Interest, ModelSummary};

/// Classifier mapping interest vectors to course names.
///
/// Built once from the full dataset and never mutated afterwards; share it
/// behind an `Arc`.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    forest: RandomForest,
    classes: Vec<String>,
    feature_columns: Vec<Interest>,
}

impl TrainedModel {
    /// Fit the forest on every row of `dataset`
    pub fn train(dataset: &Dataset, params: &ForestParams) -> Result<Self, AppError> {
        let started = Instant::now();

        let mut classes: Vec<String> = dataset.labels.clone();
        classes.sort();
        classes.dedup();

        let y: Vec<usize> = dataset
            .labels
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or_default())
            .collect();

        let forest = RandomForest::fit(&dataset.features, &y, classes.len(), params)?;

        tracing::info!(
            "Trained {} trees on {} rows ({} features, {} courses) in {:?}",
            params.n_trees,
            dataset.len(),
            dataset.feature_columns.len(),
            classes.len(),
            started.elapsed()
        );

        Ok(Self {
            forest,
            classes,
            feature_columns: dataset.feature_columns.clone(),
        })
    }

    /// Predict the course name for a vector aligned to [`Self::feature_columns`]
    pub fn predict(&self, vector: &[u8]) -> Result<&str, AppError> {
        let expected = self.forest.n_features();
        if vector.len() != expected {
            return Err(AppError::FeatureMismatch {
                expected,
                actual: vector.len(),
            });
        }
        Ok(&self.classes[self.forest.predict(vector)])
    }

    /// Feature-column order expected by [`Self::predict`]
    pub fn feature_columns(&self) -> &[Interest] {
        &self.feature_columns
    }

    /// Course labels, sorted
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            trees: self.forest.trees().len(),
            features: self.feature_columns.len(),
            courses: self.classes.len(),
        }
    }
}
