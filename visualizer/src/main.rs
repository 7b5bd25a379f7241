use std::sync::Arc;

use anyhow::Context;
use segviz::config::Config;
use segviz::output::write_composite;
use segviz::region::{load_plan, reference_plan};
use segviz::segment::build_client;
use segviz::source::load_base_image;
use segviz::{HttpSegmentationService, PipelineDriver, RegionRequestDispatcher};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "segviz=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = Config::from_env();
    info!(
        "Loaded configuration: sam_api_url={}, image={}",
        config.sam_api_url, config.image_url
    );

    // Validate the plan before touching the network
    let regions = match config.regions_file {
        Some(ref path) => load_plan(path)?,
        None => reference_plan(),
    };
    info!("Processing {} regions", regions.len());

    let client = build_client(&config.client).context("Failed to build HTTP client")?;
    let base = load_base_image(&client, &config.image_url)
        .await
        .context("Failed to load base image")?;

    let service = Arc::new(HttpSegmentationService::new(
        client,
        config.sam_api_url.clone(),
    ));
    let dispatcher = RegionRequestDispatcher::new(service).with_selection(config.mask_selection);

    let report = PipelineDriver::run(base, &dispatcher, &config.image_url, &regions).await;

    let skipped = report.outcomes.len() - report.applied_count();
    if skipped > 0 {
        warn!(
            "{} of {} regions skipped",
            skipped,
            report.outcomes.len()
        );
    }

    let path = write_composite(&config.output_dir, &report.composite)
        .context("Failed to write composite image")?;
    info!("Saved segmented image as {}", path.display());
    println!("{}", path.display());

    Ok(())
}
