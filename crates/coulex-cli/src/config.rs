use crate::cli::EnergyArgs;
use crate::error::{CliError, Result};
use coulex::engine::config::{
    DEFAULT_ENERGY_COEFF, DEFAULT_MAX_LINK, EnergyConfig, EnergyConfigBuilder,
};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialEnergySection {
    #[serde(rename = "max-link")]
    max_link: Option<usize>,
    #[serde(rename = "energy-coeff")]
    energy_coeff: Option<f64>,
    workers: Option<usize>,
}

/// The contents of a TOML configuration file, every value optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialEnergyConfig {
    energy: Option<PartialEnergySection>,
}

impl PartialEnergyConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Resolves the final configuration.
    ///
    /// Precedence, highest first: dedicated command-line flags (`--max-link`,
    /// `--energy-coeff`, `-j`), `-S key=value` assignments, the file, built-in defaults.
    pub fn merge_with_cli(mut self, args: &EnergyArgs, threads: Option<usize>) -> Result<EnergyConfig> {
        self.apply_set_values(&args.set_values)?;
        let section = self.energy.take().unwrap_or_default();

        let mut builder = EnergyConfigBuilder::new()
            .max_link(
                args.max_link
                    .or(section.max_link)
                    .unwrap_or(DEFAULT_MAX_LINK),
            )
            .energy_coeff(
                args.energy_coeff
                    .or(section.energy_coeff)
                    .unwrap_or(DEFAULT_ENERGY_COEFF),
            );
        if let Some(workers) = threads.or(section.workers) {
            builder = builder.workers(workers);
        }

        builder.build().map_err(|e| CliError::Config(e.to_string()))
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let Some((key, value_str)) = kv_pair.split_once('=') else {
                return Err(CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                )));
            };
            let section = self.energy.get_or_insert_with(Default::default);

            match key.trim() {
                "energy.max-link" => section.max_link = Some(parse_value(key, value_str, "integer")?),
                "energy.energy-coeff" => {
                    section.energy_coeff = Some(parse_value(key, value_str, "float")?)
                }
                "energy.workers" => section.workers = Some(parse_value(key, value_str, "integer")?),
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &str, value_str: &str, kind: &str) -> Result<T> {
    value_str.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
    })
}

/// Loads the optional config file and merges it with the command line.
pub fn resolve(args: &EnergyArgs, threads: Option<usize>) -> Result<EnergyConfig> {
    let partial = match &args.config {
        Some(path) => PartialEnergyConfig::from_file(path)?,
        None => PartialEnergyConfig::default(),
    };
    partial.merge_with_cli(args, threads)
}
