use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs;

#[derive(Debug, Deserialize, Clone)]
pub struct Endpoint {
    pub verb: String,
    pub url: String,
    pub code: String,
    pub response: String,
    #[serde(default)]
    pub headers: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub endpoints: Vec<Endpoint>,
}

pub fn load_config(config_file: &str) -> anyhow::Result<Config> {
    let config_data = fs::read_to_string(config_file)
        .with_context(|| format!("failed to read configuration file: {}", config_file))?;
    let config: Config = serde_json::from_str(&config_data)
        .context("failed to parse configuration file")?;

    validate_config(&config)?;

    Ok(config)
}

fn validate_config(config: &Config) -> anyhow::Result<()> {
    if config.endpoints.is_empty() {
        bail!("configuration must contain at least one endpoint");
    }

    for (i, endpoint) in config.endpoints.iter().enumerate() {
        if endpoint.verb.is_empty() {
            bail!("endpoint {}: verb is required", i);
        }
        if endpoint.url.is_empty() {
            bail!("endpoint {}: url is required", i);
        }
        if endpoint.code.is_empty() {
            bail!("endpoint {}: code is required", i);
        }
        if endpoint.response.is_empty() {
            bail!("endpoint {}: response is required", i);
        }
    }

    Ok(())
}
