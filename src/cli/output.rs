//! Output formatting for CLI

use serde::Serialize;

use crate::client::ClientSurface;
use crate::models::Resource;

/// Serialization format of the generated model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Everything handed to a code renderer
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedModel {
    pub resources: Vec<Resource>,
    pub client: ClientSurface,
}

impl GeneratedModel {
    pub fn new(resources: Vec<Resource>, client: ClientSurface) -> Self {
        Self { resources, client }
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        let rendered = match format {
            OutputFormat::Json => serde_json::to_string_pretty(self)?,
            OutputFormat::Yaml => serde_yaml::to_string(self)?,
        };
        Ok(rendered)
    }

    /// One line per resource: name, path and type count
    pub fn summary(&self) -> String {
        let mut output = String::new();
        for resource in &self.resources {
            output.push_str(&format!(
                "{} ({}): {} type(s){}\n",
                resource.name,
                resource.resource_path,
                resource.types.len(),
                if resource.is_setting { ", setting" } else { "" }
            ));
        }
        output.push_str(&format!("{} client method(s)\n", self.client.methods.len()));
        output
    }
}
