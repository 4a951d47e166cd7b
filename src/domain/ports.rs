use crate::domain::model::{AgeCollection, ResultEnvelope};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_files(&self) -> &[String];
    fn output_path(&self) -> String;
    fn allow_empty_inputs(&self) -> bool;
    fn decimal_places(&self) -> u32;
    fn include_count(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<AgeCollection>;
    async fn transform(&self, collection: AgeCollection) -> Result<ResultEnvelope>;
    async fn load(&self, envelope: &ResultEnvelope) -> Result<String>;
}
