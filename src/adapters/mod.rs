pub mod collection_builder;
pub mod command_handler;
pub mod openapi_loader;
pub mod synthesizer;
pub mod variabilizer;

#[cfg(test)]
mod variabilizer_test;
