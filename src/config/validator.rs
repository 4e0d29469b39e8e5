use thiserror::Error;

use crate::config::{CollectionSettings, GeneratorSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_generator(&settings.generator) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_collection(&settings.collection) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_generator(generator: &GeneratorSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let probability = generator.optional_property_probability;
        if !(0.0..=1.0).contains(&probability) {
            errors.push(ValidationError::InvalidValue {
                field: "generator.optional_property_probability".to_string(),
                reason: format!("must be between 0 and 1, got {}", probability),
            });
        }

        if generator.array_min_items > generator.array_max_items {
            errors.push(ValidationError::InvalidValue {
                field: "generator.array_min_items".to_string(),
                reason: format!(
                    "must not exceed array_max_items ({} > {})",
                    generator.array_min_items, generator.array_max_items
                ),
            });
        }

        if !generator.number_minimum.is_finite() || !generator.number_maximum.is_finite() {
            errors.push(ValidationError::InvalidValue {
                field: "generator.number_minimum".to_string(),
                reason: "numeric bounds must be finite".to_string(),
            });
        } else if generator.number_minimum > generator.number_maximum {
            errors.push(ValidationError::InvalidValue {
                field: "generator.number_minimum".to_string(),
                reason: format!(
                    "must not exceed number_maximum ({} > {})",
                    generator.number_minimum, generator.number_maximum
                ),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_collection(collection: &CollectionSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if collection.base_url.trim().is_empty() {
            errors.push(ValidationError::MissingField("collection.base_url".to_string()));
        }

        if collection.path_placeholder.is_empty() {
            errors.push(ValidationError::MissingField(
                "collection.path_placeholder".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
