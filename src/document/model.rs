//! Typed software-management documents.
//!
//! Records are only constructed from JSON that already passed
//! [`validate_document`](crate::document::validation::validate_document),
//! or from the platform's own bundle data. Fields this crate does not know
//! about are carried in `extra` so a document survives a decode/encode
//! cycle unchanged. Optional fields distinguish an absent key from an
//! explicit `null`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Bundle name of the software-management configuration domain.
pub const SOFTWARE_MANAGEMENT: &str = "software_management";

/// Optional field: `None` when the key is absent, `Some(None)` for `null`.
pub type Nullable<T> = Option<Option<T>>;

fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A complete software-management bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftwareConfig {
    /// Whether the bundle is active on the device group.
    pub enabled: bool,

    /// Bundle schema version as understood by the platform.
    pub version: String,

    /// Package entries, in submission order.
    pub items: Vec<Item>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One package entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub package: Nullable<String>,

    pub config_files: Vec<ConfigFile>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub parameters: Nullable<Vec<Parameter>>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A template rendered onto the device at `config_location`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub config_template: String,
    pub config_location: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Key/value substituted into config templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub key: Nullable<String>,

    #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub value: Nullable<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SoftwareConfig {
    pub fn new(enabled: bool, version: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            enabled,
            version: version.into(),
            items,
            extra: Map::new(),
        }
    }
}

impl Item {
    /// Entry for `package` with no config files or parameters.
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            package: Some(Some(name.into())),
            config_files: Vec::new(),
            parameters: None,
            extra: Map::new(),
        }
    }

    /// Package name, if set and not `null`.
    pub fn package_name(&self) -> Option<&str> {
        self.package.as_ref().and_then(|p| p.as_deref())
    }

    pub fn with_config_file(mut self, template: impl Into<String>, location: impl Into<String>) -> Self {
        self.config_files.push(ConfigFile {
            config_template: template.into(),
            config_location: location.into(),
            extra: Map::new(),
        });
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let parameters = self.parameters.get_or_insert(None).get_or_insert_with(Vec::new);
        parameters.push(Parameter {
            key: Some(Some(key.into())),
            value: Some(Some(value.into())),
            extra: Map::new(),
        });
        self
    }
}
