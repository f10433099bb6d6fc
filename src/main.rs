use clap::Parser;
use geosift::utils::{logger, validation::Validate};
use geosift::{CliConfig, FilterEngine, LocalStorage, SievePipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting geosift");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }

    let storage = LocalStorage::new();
    let to_file = config.output.is_some();
    let pipeline = SievePipeline::new(storage, config);
    let engine = FilterEngine::new(pipeline);

    match engine.run().await {
        Ok(destination) => {
            tracing::info!("Filter run completed successfully");
            if to_file {
                eprintln!("✅ Domain list written to: {}", destination);
            }
        }
        Err(e) => {
            tracing::error!("Filter run failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }

    Ok(())
}
