pub mod etl;
pub mod extractor;
pub mod pipeline;
pub mod statistics;

pub use crate::domain::model::{AgeCollection, AgeStatistics, ResultEnvelope};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
