use crate::adapters::collection_builder::CollectionBuilder;
use crate::adapters::openapi_loader::{self, ApiDocument};
use crate::adapters::synthesizer::{ExampleKind, Synthesizer};
use crate::adapters::variabilizer::VariableScope;
use crate::cli::Command;
use crate::config::Settings;
use anyhow::Result;
use rand::rngs::StdRng;
use serde_json::{json, Value};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Executes CLI commands against the loaded settings, writing results to
/// the given sink.
pub struct CommandHandler {
    settings: Settings,
}

impl CommandHandler {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn run<W: Write>(&self, command: &Command, out: &mut W) -> Result<()> {
        match command {
            Command::Endpoints { spec } => self.list_endpoints(spec, out),
            Command::Example {
                spec,
                endpoint,
                response,
            } => {
                let kind = if *response {
                    ExampleKind::Response
                } else {
                    ExampleKind::Request
                };
                self.print_example(spec, endpoint, kind, out)
            }
            Command::Collection { spec, output, .. } => {
                self.write_collection(spec, output.as_deref(), out)
            }
            Command::Variabilize { input } => self.variabilize_file(input, out),
        }
    }

    fn synthesizer(&self) -> Synthesizer<StdRng> {
        Synthesizer::from_seed_option(
            self.settings.generator.seed,
            self.settings.generator.synthesis_options(),
        )
    }

    fn list_endpoints<W: Write>(&self, spec: &Path, out: &mut W) -> Result<()> {
        let document = openapi_loader::load_document(spec)?;
        for endpoint in openapi_loader::extract_endpoints(&document) {
            match &endpoint.summary {
                Some(summary) => writeln!(out, "{:<7} {}  {}", endpoint.method, endpoint.path, summary)?,
                None => writeln!(out, "{:<7} {}", endpoint.method, endpoint.path)?,
            }
        }
        Ok(())
    }

    fn print_example<W: Write>(
        &self,
        spec: &Path,
        selector: &str,
        kind: ExampleKind,
        out: &mut W,
    ) -> Result<()> {
        let document = openapi_loader::load_document(spec)?;
        let endpoints = openapi_loader::extract_endpoints(&document);
        let endpoint = openapi_loader::find_endpoint(&endpoints, selector)?;

        let example = self
            .synthesizer()
            .example_for(endpoint, kind)
            .unwrap_or(Value::Null);
        writeln!(out, "{}", serde_json::to_string_pretty(&example)?)?;
        Ok(())
    }

    fn write_collection<W: Write>(&self, spec: &Path, output: Option<&Path>, out: &mut W) -> Result<()> {
        let document = openapi_loader::load_document(spec)?;
        let endpoints = openapi_loader::extract_endpoints(&document);

        let collection = self
            .collection_builder(&document)
            .build(&endpoints)?;
        let rendered = serde_json::to_string_pretty(&collection)?;

        match output {
            Some(path) => {
                let target = if path.is_dir() {
                    path.join(collection.file_name())
                } else {
                    path.to_path_buf()
                };
                std::fs::write(&target, rendered)?;
                info!("Wrote collection to {}", target.display());
            }
            None => writeln!(out, "{}", rendered)?,
        }
        Ok(())
    }

    fn collection_builder(&self, document: &ApiDocument) -> CollectionBuilder<StdRng> {
        let settings = &self.settings.collection;
        let mut builder = CollectionBuilder::new(self.synthesizer(), settings);
        if settings.name.is_none() {
            builder = builder.name(document.title.clone());
        }
        if settings.description.is_none() {
            if let Some(description) = &document.description {
                builder = builder.description(description.clone());
            }
        }
        builder
    }

    fn variabilize_file<W: Write>(&self, input: &Path, out: &mut W) -> Result<()> {
        let text = std::fs::read_to_string(input)?;
        let value: Value = serde_json::from_str(&text)?;

        let mut scope = VariableScope::new();
        let templated = scope.variabilize(&value);
        let report = json!({
            "data": templated,
            "variables": scope.variables(),
        });
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        Ok(())
    }
}
