use crate::core::extractor::extract_ages;
use crate::core::statistics::{calculate, round_to};
use crate::core::{AgeCollection, ConfigProvider, Pipeline, ResultEnvelope, Storage};
use crate::domain::model::{AgeStatistics, NO_INPUTS_MESSAGE, SUCCESS_MESSAGE};
use crate::utils::error::{AgeStatsError, Result};
use std::path::Path;

pub struct AgePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> AgePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    async fn read_text(&self, path: &str) -> Result<String> {
        let bytes = self.storage.read_file(path).await.map_err(|e| match e {
            AgeStatsError::IoError(io) => {
                AgeStatsError::file_operation(format!("Error reading file {}: {}", path, io))
            }
            other => other,
        })?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn build_envelope(&self, stats: &AgeStatistics, message: &str) -> ResultEnvelope {
        let rounded = AgeStatistics {
            avg_age: round_to(stats.avg_age, self.config.decimal_places()),
            ..*stats
        };
        let envelope = ResultEnvelope::success(message, &rounded);
        if self.config.include_count() {
            envelope.with_count(stats.count)
        } else {
            envelope
        }
    }
}

fn source_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for AgePipeline<S, C> {
    async fn extract(&self) -> Result<AgeCollection> {
        let inputs = self.config.input_files();
        tracing::info!("Found {} input files to process", inputs.len());

        let mut collection = AgeCollection::new();
        for (idx, path) in inputs.iter().enumerate() {
            tracing::debug!("Reading input {}: {}", idx, path);
            let text = self.read_text(path).await?;
            let ages = extract_ages(&text, source_name(path))?;
            collection.extend_from_file(ages);
        }

        Ok(collection)
    }

    async fn transform(&self, collection: AgeCollection) -> Result<ResultEnvelope> {
        if collection.files_read == 0 {
            if self.config.allow_empty_inputs() {
                tracing::warn!("No input files provided, reporting zero statistics");
                return Ok(self.build_envelope(&AgeStatistics::zero(), NO_INPUTS_MESSAGE));
            }
            return Err(AgeStatsError::validation("No input files provided"));
        }

        let stats = calculate(&collection.ages)?;
        Ok(self.build_envelope(&stats, SUCCESS_MESSAGE))
    }

    async fn load(&self, envelope: &ResultEnvelope) -> Result<String> {
        let output_path = self.config.output_path();
        let json = serde_json::to_string_pretty(envelope)?;

        tracing::debug!("Writing {} bytes to {}", json.len(), output_path);
        self.storage
            .write_file(&output_path, json.as_bytes())
            .await
            .map_err(|e| {
                AgeStatsError::file_operation(format!(
                    "Error writing results to {}: {}",
                    output_path,
                    e.detail()
                ))
            })?;

        tracing::info!("Results written to {}", output_path);
        Ok(output_path)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::{ConfigProvider, Storage};
    use crate::utils::error::{AgeStatsError, Result};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    pub struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        read_only: bool,
    }

    impl MockStorage {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn read_only() -> Self {
            Self {
                read_only: true,
                ..Self::default()
            }
        }

        pub async fn put(&self, path: &str, data: &str) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.as_bytes().to_vec());
        }

        pub async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                AgeStatsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.read_only {
                return Err(AgeStatsError::IoError(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "read-only storage",
                )));
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    #[derive(Debug, Clone)]
    pub struct TestConfig {
        pub input_files: Vec<String>,
        pub output_path: String,
        pub allow_empty_inputs: bool,
        pub decimal_places: u32,
        pub include_count: bool,
    }

    impl TestConfig {
        pub fn with_inputs(inputs: &[&str]) -> Self {
            Self {
                input_files: inputs.iter().map(|s| s.to_string()).collect(),
                output_path: "outputs/results.json".to_string(),
                allow_empty_inputs: false,
                decimal_places: 2,
                include_count: false,
            }
        }
    }

    impl ConfigProvider for TestConfig {
        fn input_files(&self) -> &[String] {
            &self.input_files
        }

        fn output_path(&self) -> String {
            self.output_path.clone()
        }

        fn allow_empty_inputs(&self) -> bool {
            self.allow_empty_inputs
        }

        fn decimal_places(&self) -> u32 {
            self.decimal_places
        }

        fn include_count(&self) -> bool {
            self.include_count
        }
    }
}
