use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

pub mod validator;

use crate::adapters::synthesizer::SynthesisOptions;
use crate::adapters::variabilizer::PATH_PLACEHOLDER_VALUE;
use crate::cli::{Cli, Command};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub generator: GeneratorSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
}

/// Randomness and cardinality knobs for example synthesis.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Fixed seed for repeatable output; entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub optional_property_probability: f64,
    pub array_min_items: usize,
    pub array_max_items: usize,
    pub number_minimum: f64,
    pub number_maximum: f64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        let options = SynthesisOptions::default();
        Self {
            seed: None,
            optional_property_probability: options.optional_property_probability,
            array_min_items: options.array_min_items,
            array_max_items: options.array_max_items,
            number_minimum: options.number_minimum,
            number_maximum: options.number_maximum,
        }
    }
}

impl GeneratorSettings {
    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            optional_property_probability: self.optional_property_probability,
            array_min_items: self.array_min_items,
            array_max_items: self.array_max_items,
            number_minimum: self.number_minimum,
            number_maximum: self.number_maximum,
        }
    }
}

/// Collection-level metadata. Name and description fall back to the
/// document's `info` block when unset.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CollectionSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub base_url: String,
    /// Literal recorded for path parameter variables
    pub path_placeholder: String,
}

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
            base_url: "http://localhost:3000".to_string(),
            path_placeholder: PATH_PLACEHOLDER_VALUE.to_string(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_root(".")
    }

    /// Create settings from CLI arguments (config file, env vars and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(cli.config.clone()).required(false))
            .add_source(Self::environment())
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validated()
    }

    pub fn from_root(root: &str) -> Result<Self, anyhow::Error> {
        let config_path = std::path::Path::new(root).join("apiforge");
        let s = Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(Self::environment())
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        settings.validated()
    }

    fn environment() -> Environment {
        Environment::with_prefix("APIFORGE")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    fn validated(self) -> Result<Self, anyhow::Error> {
        validator::ConfigValidator::validate(&self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })?;
        Ok(self)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(seed) = cli.seed {
            self.generator.seed = Some(seed);
        }

        if let Command::Collection {
            name,
            description,
            base_url,
            ..
        } = &cli.command
        {
            if let Some(name) = name {
                self.collection.name = Some(name.clone());
            }
            if let Some(description) = description {
                self.collection.description = Some(description.clone());
            }
            if let Some(base_url) = base_url {
                self.collection.base_url = base_url.clone();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults_match_synthesis_options() {
        let settings = Settings::default();
        assert_eq!(settings.generator.synthesis_options(), SynthesisOptions::default());
        assert_eq!(settings.collection.base_url, "http://localhost:3000");
        assert_eq!(settings.collection.path_placeholder, "example_value");
    }

    #[test]
    fn test_cli_overrides_collection_fields() {
        let cli = Cli::parse_from([
            "apiforge",
            "collection",
            "api.json",
            "--name",
            "Pets",
            "--base-url",
            "https://pets.example.com",
            "--seed",
            "11",
        ]);
        let mut settings = Settings::default();
        settings.apply_cli_overrides(&cli);

        assert_eq!(settings.generator.seed, Some(11));
        assert_eq!(settings.collection.name.as_deref(), Some("Pets"));
        assert!(settings.collection.description.is_none());
        assert_eq!(settings.collection.base_url, "https://pets.example.com");
    }

    #[test]
    fn test_cli_overrides_ignore_other_commands() {
        let cli = Cli::parse_from(["apiforge", "endpoints", "api.json"]);
        let mut settings = Settings::default();
        settings.apply_cli_overrides(&cli);
        assert_eq!(settings, Settings::default());
    }
}
