use crate::calc::{Step, Value};
use crate::format::MAX_DECIMAL_PLACES;
use crate::fraction::Fraction;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::include_str;
use std::io::ErrorKind;
use std::str::FromStr;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Mixed,
    Improper,
    Decimal,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mixed" => Ok(OutputFormat::Mixed),
            "improper" => Ok(OutputFormat::Improper),
            "decimal" => Ok(OutputFormat::Decimal),
            other => Err(anyhow!(
                "unknown format {:?}, expected mixed, improper or decimal",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CalcConfig {
    pub format: OutputFormat,
    pub decimal_places: u32,
    #[serde(default)]
    pub show_steps: bool,
}

impl CalcConfig {
    pub fn render(&self, value: Fraction) -> String {
        match self.format {
            OutputFormat::Mixed => value.to_string(),
            OutputFormat::Improper => value.improper().to_string(),
            OutputFormat::Decimal => value.decimal(self.decimal_places).to_string(),
        }
    }

    pub fn render_value(&self, value: Value) -> String {
        match value {
            Value::Number(v) => self.render(v),
            Value::Truth(v) => v.to_string(),
        }
    }

    pub fn render_step(&self, step: &Step) -> String {
        format!(
            "{} {} {} => {}",
            self.render(step.left),
            step.op,
            self.render(step.right),
            self.render_value(step.result)
        )
    }
}

/// Loads `explicit` when given, otherwise the first config found in the working directory, otherwise
/// the built-in defaults.
pub fn open_config_or_default(explicit: Option<&str>) -> Result<CalcConfig> {
    if let Some(file) = explicit {
        return match open_config_file(file)? {
            Some(config) => {
                info!("loaded config from {}", file);
                Ok(config)
            }
            None => Err(anyhow!("config file {} does not exist", file)),
        };
    }

    match open_config() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => default_config(),
        Err(err) => Err(err),
    }
}

macro_rules! try_load_config_from {
    ($e: literal) => {
        match open_config_file($e) {
            Ok(Some(v)) => {
                info!("loaded config from {}", $e);
                return Ok(Some(v));
            }
            Ok(None) => {
                debug!("skipping load from {}, no config at this location", $e);
            }
            Err(err) => return Err(err),
        }
    };
}

pub fn open_config() -> Result<Option<CalcConfig>> {
    try_load_config_from!("fractional.yaml");
    try_load_config_from!("fractional.yml");
    Ok(None)
}

pub fn open_config_file(file: &str) -> Result<Option<CalcConfig>> {
    let reader = match File::open(file) {
        Ok(f) => f,
        Err(err) => {
            return match err.kind() {
                ErrorKind::NotFound => Ok(None),
                other => Err(anyhow!("error opening file {} :: {:?}", file, other)),
            }
        }
    };

    let config = serde_yaml::from_reader(reader)
        .with_context(|| format!("invalid config in {}", file))?;
    Ok(Some(validate_config(config)?))
}

pub fn parse_config(text: &str) -> Result<CalcConfig> {
    validate_config(serde_yaml::from_str(text)?)
}

fn validate_config(cfg: CalcConfig) -> Result<CalcConfig> {
    if cfg.decimal_places > MAX_DECIMAL_PLACES {
        return Err(anyhow!(
            "decimal_places must be at most {}, got {}",
            MAX_DECIMAL_PLACES,
            cfg.decimal_places
        ));
    }

    if cfg.format == OutputFormat::Decimal && cfg.decimal_places == 0 {
        warn!("decimal format with 0 decimal_places rounds every result to a whole number");
    }

    Ok(cfg)
}

fn default_config() -> Result<CalcConfig> {
    let out = parse_config(include_str!("default-config.yml")).context("built-in default config")?;
    info!("using default config...");
    Ok(out)
}
