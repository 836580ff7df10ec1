//! Validate-model command - exercises a registry model from the terminal

use crate::config::AppConfig;
use crate::domain::ModelSpec;
use crate::infrastructure::logging;

pub async fn run(name: Option<String>, version: Option<String>) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&config.logging);

    let state = crate::create_app_state(&config).await?;
    let model = name.map(|name| ModelSpec { name, version });

    let report = state.predictions.validate_model(model).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
