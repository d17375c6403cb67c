//! Resource loading from a fields directory
//!
//! Every `<Name>.json` field-definition file becomes one resource. Files
//! are processed in file name order; a file that cannot be read or
//! inferred is logged and skipped.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::customize::{CodeCustomizer, CustomizationError};
use crate::inference::{FieldInferrer, InferenceResult, install_builtins};
use crate::models::Resource;
use crate::naming::resource_name;

/// Errors that abort a whole load
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("unable to read fields directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Customization(#[from] CustomizationError),
}

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Builds resources from field-definition documents
#[derive(Debug, Clone)]
pub struct ResourceLoader {
    config: GeneratorConfig,
    customizer: CodeCustomizer,
    inferrer: FieldInferrer,
}

impl ResourceLoader {
    /// Create a loader, reading the customization layers named by `config`
    pub fn new(config: GeneratorConfig) -> LoaderResult<Self> {
        let customizer = CodeCustomizer::new(config.customizations_path.as_deref())?;
        Ok(Self::with_customizer(config, customizer))
    }

    pub fn with_customizer(config: GeneratorConfig, customizer: CodeCustomizer) -> Self {
        let inferrer = FieldInferrer::new(config.field_corrections.clone());
        Self {
            config,
            customizer,
            inferrer,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn customizer(&self) -> &CodeCustomizer {
        &self.customizer
    }

    /// Build one resource from a file stem and its document
    pub fn load_resource(&self, file_stem: &str, json: &str) -> InferenceResult<Resource> {
        let name = resource_name(file_stem, &self.config.file_corrections);
        let mut resource = Resource::with_setting_prefix(
            name,
            file_stem.to_lowercase(),
            &self.config.setting_prefix,
        );
        install_builtins(&mut resource);
        self.customizer.apply_to_resource(&mut resource);
        self.inferrer.infer_json(&mut resource, json)?;
        Ok(resource)
    }

    /// Build every resource in `dir`
    pub fn load_dir(&self, dir: &Path) -> LoaderResult<Vec<Resource>> {
        let entries = std::fs::read_dir(dir).map_err(|source| LoaderError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        files.sort();

        let mut resources = Vec::new();
        for path in files {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if self.config.is_skipped(file_name) {
                continue;
            }
            let Some(stem) = file_name.strip_suffix(".json") else {
                continue;
            };

            debug!("Processing {}...", file_name);
            let json = match std::fs::read_to_string(&path) {
                Ok(json) => json,
                Err(e) => {
                    warn!("skipping file {}: {}", file_name, e);
                    continue;
                }
            };

            match self.load_resource(stem, &json) {
                Ok(resource) => resources.push(resource),
                Err(e) => warn!("skipping file {}: {}", file_name, e),
            }
        }

        info!("Loaded {} resources from {}", resources.len(), dir.display());
        Ok(resources)
    }
}

/// Build every resource in `dir` with an already loaded customizer
pub fn build_resources(
    dir: &Path,
    config: &GeneratorConfig,
    customizer: &CodeCustomizer,
) -> LoaderResult<Vec<Resource>> {
    ResourceLoader::with_customizer(config.clone(), customizer.clone()).load_dir(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types;
    use std::fs;
    use tempfile::TempDir;

    fn loader() -> ResourceLoader {
        ResourceLoader::new(GeneratorConfig::default()).unwrap()
    }

    #[test]
    fn test_load_resource_names_and_paths() {
        let network = loader().load_resource("NetworkConf", "{}").unwrap();
        assert_eq!(network.name, "Network");
        assert_eq!(network.resource_path, "networkconf");

        let wlan = loader().load_resource("WlanConf", "{}").unwrap();
        assert_eq!(wlan.name, "WLAN");
        assert!(wlan.base_type().unwrap().field("WLANGroupID").is_some());

        let mgmt = loader().load_resource("SettingMgmt", "{}").unwrap();
        assert!(mgmt.is_setting);
        assert_eq!(mgmt.resource_path, "mgmt");
    }

    #[test]
    fn test_customizations_and_built_ins_compose() {
        let device = loader()
            .load_resource("Device", r#"{"x": "[-+]?[0-9]*\\.?[0-9]+", "name": ".{1,128}"}"#)
            .unwrap();
        let base = device.base_type().unwrap();
        assert_eq!(base.field("X").unwrap().field_type, types::FLOAT);
        assert!(base.field("Name").unwrap().omit_empty);
        assert!(base.field("MAC").is_some());
    }

    #[test]
    fn test_load_dir_order_and_skips() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Wall.json"), "{}").unwrap();
        fs::write(dir.path().join("Setting.json"), "{}").unwrap();
        fs::write(dir.path().join("README.md"), "notes").unwrap();
        fs::write(dir.path().join("Tag.json"), r#"{"name": ".{1,32}"}"#).unwrap();
        fs::write(dir.path().join("Account.json"), r#"{"vlan": "[2-9]|[1-9][0-9]{1,2}"}"#).unwrap();
        fs::write(dir.path().join("Broken.json"), r#"{"count": 3}"#).unwrap();
        fs::write(dir.path().join("Garbage.json"), "{not json").unwrap();

        let resources = loader().load_dir(dir.path()).unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Account", "Tag"]);

        let vlan = resources[0].base_type().unwrap().field("VLAN").unwrap().clone();
        assert_eq!(vlan.field_type, types::INT);
        assert_eq!(vlan.custom_unmarshal_type.as_deref(), Some("emptyStringInt"));
    }

    #[test]
    fn test_missing_dir() {
        let err = loader().load_dir(Path::new("/nonexistent/fields")).unwrap_err();
        assert!(matches!(err, LoaderError::ReadDir { .. }));
        assert!(err.to_string().contains("/nonexistent/fields"));
    }

    #[test]
    fn test_bad_customizations_path() {
        let config = GeneratorConfig::builder()
            .customizations_path("/nonexistent/customizations.yml")
            .build();
        let err = ResourceLoader::new(config).unwrap_err();
        assert!(matches!(err, LoaderError::Customization(_)));
    }

    #[test]
    fn test_build_resources() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("SettingUsg.json"), r#"{"tcp_timeout": "[1-9][0-9]*"}"#).unwrap();

        let customizer = CodeCustomizer::defaults().unwrap();
        let resources = build_resources(dir.path(), &GeneratorConfig::default(), &customizer).unwrap();
        assert_eq!(resources.len(), 1);
        let timeout = resources[0].base_type().unwrap().field("TCPTimeout").unwrap().clone();
        assert_eq!(timeout.field_type, types::INT);
        assert_eq!(resources[0].resource_path, "usg");
    }
}
