use crate::adapters::synthesizer::Synthesizer;
use crate::adapters::variabilizer::VariableScope;
use crate::config::CollectionSettings;
use crate::domain::collection::{
    CollectionInfo, PostmanBody, PostmanCollection, PostmanHeader, PostmanItem, PostmanRequest,
    PostmanUrl, POSTMAN_SCHEMA_URL,
};
use crate::domain::endpoint::Endpoint;
use crate::error::Result;
use rand::Rng;
use tracing::{debug, info};

const DEFAULT_COLLECTION_NAME: &str = "OpenAPI Collection";
const DEFAULT_COLLECTION_DESCRIPTION: &str = "Generated from OpenAPI";

/// Turns endpoints into a Postman collection whose generated literals all
/// live in the collection's variable table.
pub struct CollectionBuilder<R: Rng> {
    synthesizer: Synthesizer<R>,
    name: String,
    description: String,
    base_url: String,
    path_placeholder: String,
}

impl<R: Rng> CollectionBuilder<R> {
    pub fn new(synthesizer: Synthesizer<R>, settings: &CollectionSettings) -> Self {
        Self {
            synthesizer,
            name: settings
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string()),
            description: settings
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_COLLECTION_DESCRIPTION.to_string()),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            path_placeholder: settings.path_placeholder.clone(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Build the collection. All endpoints share one variable scope, so the
    /// leaf counter keeps climbing across requests and path parameters are
    /// registered once for the whole collection.
    pub fn build(&mut self, endpoints: &[Endpoint]) -> Result<PostmanCollection> {
        let mut scope = VariableScope::new();

        let mut items = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            items.push(self.build_item(endpoint, &mut scope)?);
        }

        let variables = scope.into_variables();
        info!(
            "Built collection '{}' with {} requests and {} variables",
            self.name,
            items.len(),
            variables.len()
        );

        Ok(PostmanCollection {
            info: CollectionInfo {
                name: self.name.clone(),
                description: self.description.clone(),
                schema: POSTMAN_SCHEMA_URL.to_string(),
            },
            item: items,
            variable: variables,
        })
    }

    fn build_item(&mut self, endpoint: &Endpoint, scope: &mut VariableScope) -> Result<PostmanItem> {
        let path = scope.substitute_path_segments(&endpoint.path_segments(), &self.path_placeholder);

        let body = match (&endpoint.request_schema, endpoint.method.carries_body()) {
            (Some(schema), true) => {
                let example = self.synthesizer.synthesize(schema);
                let templated = scope.variabilize(&example);
                debug!("Templated request body for {}", endpoint.label());
                Some(PostmanBody::raw_json(serde_json::to_string_pretty(&templated)?))
            }
            _ => None,
        };

        Ok(PostmanItem {
            name: endpoint
                .summary
                .clone()
                .unwrap_or_else(|| endpoint.label()),
            request: PostmanRequest {
                method: endpoint.method.to_string(),
                header: vec![
                    PostmanHeader::text("Content-Type", "application/json"),
                    PostmanHeader::text("Accept", "application/json"),
                ],
                url: PostmanUrl {
                    raw: format!("{}/{}", self.base_url, path.join("/")),
                    host: vec![self.base_url.clone()],
                    path,
                },
                body,
            },
            response: Vec::new(),
        })
    }
}
