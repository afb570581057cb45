use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::AppError;
use crate::models::{CourseRecord, FeatureVector, Interest};

pub const COURSE_COLUMN: &str = "Courses";
pub const TOP_CAREERS_COLUMN: &str = "Top Careers";
pub const HIGHEST_POSITION_COLUMN: &str = "Highest Position";
pub const AVG_SALARY_COLUMN: &str = "Avg Salary";
pub const SOCIAL_RESPECT_COLUMN: &str = "Social Respect";

/// Columns that describe a course rather than flag an interest
pub const DESCRIPTIVE_COLUMNS: [&str; 5] = [
    COURSE_COLUMN,
    TOP_CAREERS_COLUMN,
    HIGHEST_POSITION_COLUMN,
    AVG_SALARY_COLUMN,
    SOCIAL_RESPECT_COLUMN,
];

/// Deduplicated course descriptions, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct CourseInfo {
    records: Vec<CourseRecord>,
}

impl CourseInfo {
    /// Build from raw rows, keeping the first occurrence of each distinct row
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = CourseRecord>,
    {
        let mut seen = HashSet::new();
        let records = rows
            .into_iter()
            .filter(|record| seen.insert(record.clone()))
            .collect();
        Self { records }
    }

    /// First record for `course`
    pub fn get(&self, course: &str) -> Option<&CourseRecord> {
        self.records.iter().find(|r| r.course == course)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Course names that kept more than one distinct description after dedup
    pub fn conflicting_courses(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(record.course.as_str()).or_default() += 1;
        }
        let mut conflicts: Vec<&str> = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(course, _)| course)
            .collect();
        conflicts.sort_unstable();
        conflicts
    }
}

/// Training data and course table read from the course CSV
#[derive(Debug, Clone)]
pub struct Dataset {
    pub feature_columns: Vec<Interest>,
    pub features: Vec<FeatureVector>,
    pub labels: Vec<String>,
    pub course_info: CourseInfo,
}

impl Dataset {
    /// Load the dataset from a CSV file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            AppError::DataUnavailable(format!("cannot open {}: {}", path.display(), e))
        })?;
        let dataset = Self::from_reader(file)?;

        tracing::info!(
            "Loaded {} rows, {} feature columns and {} courses from {}",
            dataset.len(),
            dataset.feature_columns.len(),
            dataset.course_info.len(),
            path.display()
        );

        Ok(dataset)
    }

    /// Parse the dataset from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AppError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();

        let mut descriptive = [0usize; 5];
        for (slot, name) in descriptive.iter_mut().zip(DESCRIPTIVE_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| AppError::DataUnavailable(format!("missing column '{}'", name)))?;
        }

        let mut feature_columns = Vec::new();
        let mut feature_indices = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            if DESCRIPTIVE_COLUMNS.contains(&header) {
                continue;
            }
            let interest: Interest = header.parse().map_err(|_| {
                AppError::DataUnavailable(format!("column '{}' is not a known interest", header))
            })?;
            if feature_columns.contains(&interest) {
                return Err(AppError::DataUnavailable(format!("duplicate column '{}'", header)));
            }
            feature_columns.push(interest);
            feature_indices.push(idx);
        }

        if feature_columns.is_empty() {
            return Err(AppError::DataUnavailable("no feature columns".to_string()));
        }

        let mut features = Vec::new();
        let mut labels = Vec::new();
        let mut descriptions = Vec::new();

        for (row, result) in reader.records().enumerate() {
            let record = result?;
            // Header is line 1
            let line = row + 2;

            let mut vector = Vec::with_capacity(feature_indices.len());
            for (&idx, interest) in feature_indices.iter().zip(&feature_columns) {
                let cell = record.get(idx).unwrap_or("");
                vector.push(parse_flag(cell).ok_or_else(|| {
                    AppError::DataUnavailable(format!(
                        "line {}: column '{}' has non-binary value '{}'",
                        line, interest, cell
                    ))
                })?);
            }

            let field = |i: usize| record.get(descriptive[i]).unwrap_or("").trim().to_string();
            let course = field(0);
            if course.is_empty() {
                return Err(AppError::DataUnavailable(format!("line {}: empty course name", line)));
            }

            descriptions.push(CourseRecord {
                course: course.clone(),
                top_careers: field(1),
                highest_position: field(2),
                avg_salary: field(3),
                social_respect: field(4),
            });
            features.push(vector);
            labels.push(course);
        }

        if labels.is_empty() {
            return Err(AppError::DataUnavailable("dataset has no rows".to_string()));
        }

        let course_info = CourseInfo::from_rows(descriptions);
        for course in course_info.conflicting_courses() {
            tracing::warn!("Course '{}' has differing descriptions; the first one is used", course);
        }

        let missing: Vec<&str> = Interest::ALL
            .iter()
            .filter(|i| !feature_columns.contains(*i))
            .map(|i| i.key())
            .collect();
        if !missing.is_empty() {
            tracing::warn!("Interests without a dataset column: {}", missing.join(", "));
        }

        Ok(Self {
            feature_columns,
            features,
            labels,
            course_info,
        })
    }

    /// Number of training rows
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

fn parse_flag(cell: &str) -> Option<u8> {
    match cell.trim() {
        "0" | "0.0" => Some(0),
        "1" | "1.0" => Some(1),
        _ => None,
    }
}
