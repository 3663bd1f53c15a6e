use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A single device record from the configuration file.
///
/// Only `codename` is required; anything else in the record (display name,
/// notes, CI labels) is carried through untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub codename: String,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Device {
    /// Look up a field by name, rendered as a plain string.
    ///
    /// `codename` resolves to the typed field; everything else goes through
    /// the auxiliary map. Returns `None` when the record has no such field.
    pub fn field(&self, name: &str) -> Option<String> {
        if name == "codename" {
            return Some(self.codename.clone());
        }
        self.extra.get(name).map(render_scalar)
    }

    /// One-line JSON representation of the whole record.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"codename\":{:?}}}", self.codename))
    }
}

fn render_scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => String::new(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// The device configuration file: a top-level `devices:` sequence.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DeviceList {
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl DeviceList {
    /// Read and parse a device list from the given path.
    pub fn from_path(path: &Path) -> Result<Self> {
        tracing::debug!("Reading device list from: {}", path.display());

        let content = fs::read_to_string(path)?;
        let list = Self::from_str(&content)?;

        tracing::info!("Loaded {} devices", list.devices.len());

        Ok(list)
    }

    /// Parse a device list from a YAML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }
}
