use crate::domain::model::{FilterOutcome, RankedDomains};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::IpAddr;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn records_path(&self) -> &str;
    fn network_path(&self) -> Option<&str>;
    fn output_path(&self) -> Option<&str>;
    fn resolve_dns(&self) -> bool;
    fn max_workers(&self) -> usize;
    fn timeout_secs(&self) -> u64;
}

/// Seam for DNS resolution so tests can hold the oracle fixed.
#[async_trait]
pub trait Resolver: Send + Sync + 'static {
    async fn resolve(&self, host: &str) -> std::io::Result<Vec<IpAddr>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<RankedDomains>;
    async fn transform(&self, ranked: RankedDomains) -> Result<FilterOutcome>;
    async fn load(&self, outcome: FilterOutcome) -> Result<String>;
}
