use crate::core::{Pipeline, ResultEnvelope};
use crate::utils::error::{AgeStatsError, Result};
use crate::utils::monitor::SystemMonitor;

/// What a finished run produced: where the envelope went and what it said.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: String,
    pub envelope: ResultEnvelope,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Extracts and computes, turning every failure into an error envelope.
    pub async fn execute(&self) -> ResultEnvelope {
        match self.try_execute().await {
            Ok(envelope) => envelope,
            Err(e) => {
                log_failure(&e);
                ResultEnvelope::error(e.envelope_message())
            }
        }
    }

    async fn try_execute(&self) -> Result<ResultEnvelope> {
        tracing::info!("Extracting ages...");
        let collection = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} ages from {} files",
            collection.len(),
            collection.files_read
        );
        self.monitor.log_stats("Extract");

        tracing::info!("Calculating statistics...");
        let envelope = self.pipeline.transform(collection).await?;
        self.monitor.log_stats("Transform");

        Ok(envelope)
    }

    /// Runs the job and writes the envelope. Only a failed write is
    /// returned as an error, since nothing is left to report it through.
    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("Starting age statistics run");

        let envelope = self.execute().await;
        self.finish(envelope).await
    }

    /// Writes an error envelope for a failure that happened before the
    /// run could start, such as an unreadable inputs directory.
    pub async fn report_failure(&self, error: &AgeStatsError) -> Result<RunOutcome> {
        log_failure(error);
        self.finish(ResultEnvelope::error(error.envelope_message()))
            .await
    }

    async fn finish(&self, envelope: ResultEnvelope) -> Result<RunOutcome> {
        tracing::info!("Writing {:?} result...", envelope.status);
        let result = self.pipeline.load(&envelope).await;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        match result {
            Ok(output_path) => Ok(RunOutcome {
                output_path,
                envelope,
            }),
            Err(e) => {
                tracing::error!("Failed to save results: {}", e);
                Err(e)
            }
        }
    }
}

fn log_failure(error: &AgeStatsError) {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        error,
        error.category(),
        error.severity()
    );
}
