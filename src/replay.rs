use crate::error::{GpasError, Result};
use crate::types::bundle::ActivityBundle;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub fn load_bundle(path: &Path) -> Result<ActivityBundle> {
    let content = read_existing(path)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn write_bundle(path: &Path, bundle: &ActivityBundle) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, serde_json::to_string_pretty(bundle)?)?;
    Ok(())
}

/// Feature document read back from disk: the object as written (for
/// display) and its numeric entries (for scoring).
#[derive(Debug, Clone)]
pub struct FeatureDocument {
    pub user: Option<String>,
    pub raw: Map<String, Value>,
    pub values: BTreeMap<String, f64>,
}

/// Accepts either a bare `{key: number}` object or a full JSON report
/// whose `features` member is one. Non-numeric entries are ignored.
pub fn load_feature_document(path: &Path) -> Result<FeatureDocument> {
    let content = read_existing(path)?;
    let value: Value = serde_json::from_str(&content)?;
    parse_feature_document(value).ok_or_else(|| {
        GpasError::ConfigParse(format!(
            "{}: expected a JSON object of feature values",
            path.display()
        ))
    })
}

fn parse_feature_document(value: Value) -> Option<FeatureDocument> {
    let Value::Object(mut object) = value else {
        return None;
    };
    let user = object
        .get("user")
        .and_then(Value::as_str)
        .map(str::to_string);
    let raw = match object.remove("features") {
        Some(Value::Object(features)) => features,
        Some(_) => return None,
        None => object,
    };
    let values = raw
        .iter()
        .filter_map(|(key, value)| value.as_f64().map(|number| (key.clone(), number)))
        .collect();
    Some(FeatureDocument { user, raw, values })
}

fn read_existing(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(GpasError::FileNotFound(path.display().to_string()));
    }
    Ok(fs::read_to_string(path)?)
}
