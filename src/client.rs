//! Client surface builder
//!
//! Derives the ordered list of client method descriptors from the final
//! resource set. Regular resources get Get/List/Create/Update/Delete,
//! setting resources only Get/Update. Hand-written functions declared in
//! customization documents are appended as-is.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::customize::CodeCustomizer;
use crate::models::Resource;

/// A named, typed parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionParam {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl FunctionParam {
    pub fn new(name: impl Into<String>, param_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
        }
    }
}

/// One client method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    #[serde(rename = "resource-name")]
    pub resource: String,
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<FunctionParam>,
    #[serde(default)]
    pub returns: Vec<String>,
    #[serde(default)]
    pub comment: String,
}

impl MethodDescriptor {
    /// Rendered signature, e.g. `GetDevice(ctx context.Context, site string, id string) (*Device, error)`
    pub fn signature(&self) -> String {
        if self.name.is_empty() {
            return String::new();
        }
        let params = self
            .parameters
            .iter()
            .map(|p| format!("{} {}", p.name, p.param_type))
            .collect::<Vec<_>>()
            .join(", ");

        let mut signature = format!("{}({})", self.name, params);
        match self.returns.as_slice() {
            [] => {}
            [single] => {
                signature.push(' ');
                signature.push_str(single);
            }
            many => {
                signature.push_str(" (");
                signature.push_str(&many.join(", "));
                signature.push(')');
            }
        }
        signature
    }

    /// Comment line to render above the method, led by the method name
    pub fn doc_comment(&self) -> Option<String> {
        let comment = self.comment.trim();
        if comment.is_empty() {
            None
        } else if comment.starts_with(&self.name) {
            Some(comment.to_string())
        } else {
            Some(format!("{} {}", self.name, comment))
        }
    }
}

/// The generated client description handed to renderers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSurface {
    pub imports: Vec<String>,
    pub methods: Vec<MethodDescriptor>,
}

impl ClientSurface {
    /// Method names in output order
    pub fn method_names(&self) -> Vec<&str> {
        self.methods.iter().map(|m| m.name.as_str()).collect()
    }

    pub fn methods_for<'a>(&'a self, resource: &'a str) -> impl Iterator<Item = &'a MethodDescriptor> {
        self.methods.iter().filter(move |m| m.resource == resource)
    }

    /// Header comment of one resource's method group
    pub fn section_comment(resource: &str) -> String {
        format!("client methods for {resource} resource")
    }
}

/// Builder for [`ClientSurface`]
#[derive(Debug, Default)]
pub struct ClientSurfaceBuilder {
    imports: Vec<String>,
    methods: Vec<MethodDescriptor>,
}

impl ClientSurfaceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder seeded with every resource not excluded by `customizer`,
    /// plus its imports and hand-written functions
    pub fn from_resources(resources: &[Resource], customizer: &CodeCustomizer) -> Self {
        Self::new()
            .add_resources(resources, |name| customizer.is_excluded_from_client(name))
            .add_functions(customizer.client_functions())
            .add_imports(customizer.client_imports())
    }

    /// Add the CRUD methods of one resource
    pub fn add_resource(mut self, resource: &Resource) -> Self {
        let name = resource.name.as_str();
        if resource.is_setting {
            self.add_resource_method("Get", name, "retrieves the settings for a resource", vec![], vec![pointer(name)]);
            self.add_resource_method("Update", name, "updates a resource", vec![pointer_param(name)], vec![pointer(name)]);
            return self;
        }

        self.add_resource_method("Get", name, "retrieves a resource", vec![id_param()], vec![pointer(name)]);
        self.add_resource_method("List", name, "lists the resources", vec![], vec![format!("[]*{name}")]);
        self.add_resource_method("Create", name, "creates a resource", vec![pointer_param(name)], vec![pointer(name)]);
        self.add_resource_method("Update", name, "updates a resource", vec![pointer_param(name)], vec![pointer(name)]);
        self.add_resource_method("Delete", name, "deletes a resource", vec![id_param()], vec![]);
        self
    }

    /// Add every resource for which `is_excluded` returns false
    pub fn add_resources<F>(mut self, resources: &[Resource], is_excluded: F) -> Self
    where
        F: Fn(&str) -> bool,
    {
        for resource in resources {
            if is_excluded(&resource.name) {
                debug!("Excluding {} from the client", resource.name);
                continue;
            }
            self = self.add_resource(resource);
        }
        self
    }

    pub fn add_function(mut self, function: MethodDescriptor) -> Self {
        self.methods.push(function);
        self
    }

    pub fn add_functions(mut self, functions: impl IntoIterator<Item = MethodDescriptor>) -> Self {
        self.methods.extend(functions);
        self
    }

    pub fn add_import(mut self, import: impl Into<String>) -> Self {
        self.imports.push(import.into());
        self
    }

    pub fn add_imports(mut self, imports: impl IntoIterator<Item = String>) -> Self {
        self.imports.extend(imports);
        self
    }

    /// Sort by resource name, then by rendered signature
    pub fn build(mut self) -> ClientSurface {
        self.methods.sort_by(|a, b| {
            a.resource
                .cmp(&b.resource)
                .then_with(|| a.signature().cmp(&b.signature()))
        });
        ClientSurface {
            imports: self.imports,
            methods: self.methods,
        }
    }

    fn add_resource_method(
        &mut self,
        action: &str,
        resource: &str,
        comment: &str,
        extra_params: Vec<FunctionParam>,
        mut returns: Vec<String>,
    ) {
        let name = format!("{action}{resource}");
        let mut parameters = vec![
            FunctionParam::new("ctx", "context.Context"),
            FunctionParam::new("site", "string"),
        ];
        parameters.extend(extra_params);
        returns.push("error".to_string());

        self.methods.push(MethodDescriptor {
            resource: resource.to_string(),
            comment: format!("{name} {comment}"),
            name,
            parameters,
            returns,
        });
    }
}

fn pointer(resource: &str) -> String {
    format!("*{resource}")
}

fn pointer_param(resource: &str) -> FunctionParam {
    let name = resource
        .chars()
        .next()
        .map(|c| c.to_lowercase().to_string())
        .unwrap_or_default();
    FunctionParam::new(name, pointer(resource))
}

fn id_param() -> FunctionParam {
    FunctionParam::new("id", "string")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_rendering() {
        let method = MethodDescriptor {
            resource: "Device".to_string(),
            name: "GetDevice".to_string(),
            parameters: vec![
                FunctionParam::new("ctx", "context.Context"),
                FunctionParam::new("site", "string"),
                FunctionParam::new("id", "string"),
            ],
            returns: vec!["*Device".to_string(), "error".to_string()],
            comment: String::new(),
        };
        assert_eq!(
            method.signature(),
            "GetDevice(ctx context.Context, site string, id string) (*Device, error)"
        );
        assert_eq!(method.doc_comment(), None);

        let single = MethodDescriptor {
            returns: vec!["error".to_string()],
            comment: "deletes it".to_string(),
            ..method.clone()
        };
        assert!(single.signature().ends_with(") error"));
        assert_eq!(single.doc_comment().as_deref(), Some("GetDevice deletes it"));

        let none = MethodDescriptor {
            returns: vec![],
            parameters: vec![],
            ..method
        };
        assert_eq!(none.signature(), "GetDevice()");
    }

    #[test]
    fn test_regular_resource_methods() {
        let surface = ClientSurfaceBuilder::new()
            .add_resource(&Resource::new("Network", "networkconf"))
            .build();

        assert_eq!(
            surface.method_names(),
            vec!["CreateNetwork", "DeleteNetwork", "GetNetwork", "ListNetwork", "UpdateNetwork"]
        );

        let create = &surface.methods[0];
        assert_eq!(create.parameters[2], FunctionParam::new("n", "*Network"));
        assert_eq!(create.returns, vec!["*Network", "error"]);
        assert_eq!(create.doc_comment().as_deref(), Some("CreateNetwork creates a resource"));

        let delete = &surface.methods[1];
        assert_eq!(delete.returns, vec!["error"]);
        assert_eq!(delete.parameters[2], FunctionParam::new("id", "string"));

        let list = &surface.methods[3];
        assert_eq!(list.returns, vec!["[]*Network", "error"]);
        assert_eq!(list.parameters.len(), 2);
    }

    #[test]
    fn test_setting_resource_methods() {
        let surface = ClientSurfaceBuilder::new()
            .add_resource(&Resource::new("SettingMgmt", "settingmgmt"))
            .build();

        assert_eq!(surface.method_names(), vec!["GetSettingMgmt", "UpdateSettingMgmt"]);
        assert_eq!(
            surface.methods[0].comment,
            "GetSettingMgmt retrieves the settings for a resource"
        );
        assert_eq!(surface.methods[0].parameters.len(), 2);
    }

    #[test]
    fn test_sorted_by_resource_then_signature() {
        let custom = MethodDescriptor {
            resource: "Account".to_string(),
            name: "AdoptAccount".to_string(),
            parameters: vec![],
            returns: vec!["error".to_string()],
            comment: String::new(),
        };
        let surface = ClientSurfaceBuilder::new()
            .add_resource(&Resource::new("Device", "device"))
            .add_resource(&Resource::new("Account", "account"))
            .add_function(custom)
            .add_import("context")
            .build();

        assert_eq!(surface.methods[0].name, "AdoptAccount");
        assert!(surface.methods[..6].iter().all(|m| m.resource == "Account"));
        assert!(surface.methods[6..].iter().all(|m| m.resource == "Device"));
        assert_eq!(surface.methods_for("Device").count(), 5);
        assert_eq!(surface.imports, vec!["context"]);
    }

    #[test]
    fn test_exclusion_predicate() {
        let resources = vec![
            Resource::new("Device", "device"),
            Resource::new("HeatMap", "heatmap"),
            Resource::new("HeatMapPoint", "heatmappoint"),
        ];
        let surface = ClientSurfaceBuilder::new()
            .add_resources(&resources, |name| name.starts_with("HeatMap"))
            .build();
        assert!(surface.methods.iter().all(|m| m.resource == "Device"));
    }

    #[test]
    fn test_section_comment() {
        assert_eq!(
            ClientSurface::section_comment("Device"),
            "client methods for Device resource"
        );
    }
}
