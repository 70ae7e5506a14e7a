//! Fire Type Classifier - Main Entry Point

use anyhow::Context;

use fire_type_classifier::api;
use fire_type_classifier::constants::{APP_NAME, APP_VERSION};
use fire_type_classifier::logic::{AppContext, ArtifactConfig, PredictController};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}...", APP_NAME, APP_VERSION);

    if let Err(e) = run() {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let config = ArtifactConfig::from_env();
    log::info!("   Model:  {}", config.model_path.display());
    log::info!("   Scaler: {}", config.scaler_path.display());
    if let Some(manifest) = &config.manifest_path {
        log::info!("   Manifest: {}", manifest.display());
    }

    let context = AppContext::load(&config).context("Failed to load classifier artifacts")?;
    let mut controller = PredictController::new(&context);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    api::run(&mut controller, stdin.lock(), stdout.lock()).context("Prediction session aborted")?;

    log::info!("Session ended");
    Ok(())
}
