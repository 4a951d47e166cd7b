use serde::{Deserialize, Serialize};

/// Lowest accepted age, in years.
pub const MIN_AGE: u64 = 0;
/// Highest accepted age, in years.
pub const MAX_AGE: u64 = 150;

pub const SUCCESS_MESSAGE: &str = "Algorithm executed successfully";
pub const NO_INPUTS_MESSAGE: &str = "No input files provided; statistics default to zero";

/// Ages gathered from every input of one run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeCollection {
    pub ages: Vec<u64>,
    pub files_read: usize,
}

impl AgeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend_from_file(&mut self, ages: Vec<u64>) {
        self.ages.extend(ages);
        self.files_read += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ages.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeStatistics {
    pub min_age: u64,
    pub max_age: u64,
    pub avg_age: f64,
    pub count: usize,
}

impl AgeStatistics {
    pub fn zero() -> Self {
        Self {
            min_age: 0,
            max_age: 0,
            avg_age: 0.0,
            count: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Success,
    Error,
}

/// The JSON document written at the end of every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    pub status: RunStatus,
    pub message: String,
    pub min_age: u64,
    pub max_age: u64,
    pub avg_age: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ResultEnvelope {
    pub fn success(message: impl Into<String>, stats: &AgeStatistics) -> Self {
        Self {
            status: RunStatus::Success,
            message: message.into(),
            min_age: stats.min_age,
            max_age: stats.max_age,
            avg_age: stats.avg_age,
            count: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: RunStatus::Error,
            message: message.into(),
            min_age: 0,
            max_age: 0,
            avg_age: 0.0,
            count: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == RunStatus::Success
    }
}
