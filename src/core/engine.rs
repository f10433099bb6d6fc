use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct FilterEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> FilterEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Drive the three phases in order: extract, classify/verify, emit.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Extracting ranked domains...");
        let ranked = self.pipeline.extract().await?;
        tracing::info!("Extracted {} unique hostnames", ranked.ranks.len());

        tracing::info!("Classifying domains...");
        let outcome = self.pipeline.transform(ranked).await?;

        tracing::info!("Writing domain list...");
        let destination = self.pipeline.load(outcome).await?;
        tracing::info!("Output written to: {}", destination);

        Ok(destination)
    }
}
