//! Release metadata documents and their two-tier lookup.
//!
//! A `dist.json` for `(name, version)` is read from the local releases tree
//! when present (newly cut versions are not published yet) and otherwise
//! fetched from the remote namespace. Fields other than the dates pass through
//! untouched and in their original order.
use crate::config::DatePolicy;
use crate::date::{normalize_release_date, parse_release_date, INVALID_DATE};
use crate::paths::{remote_metadata_key, SitePaths};
use crate::remote::RemoteStore;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;

pub const DATE_FIELD: &str = "date";
pub const DATE_UTC_FIELD: &str = "dateUTC";

/// A `dist.json` document for one distribution version.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ReleaseMetadata(Map<String, Value>);

impl ReleaseMetadata {
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("parse dist.json")?;
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(anyhow!(
                "dist.json must be a JSON object (got {})",
                json_kind(&other)
            )),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Canonical UTC date, if present and non-empty.
    pub fn date_utc(&self) -> Option<&str> {
        self.0
            .get(DATE_UTC_FIELD)
            .filter(|value| is_truthy(value))
            .and_then(Value::as_str)
    }

    /// Parsed `dateUTC`; `None` when absent or unparseable.
    pub fn date_utc_instant(&self) -> Option<DateTime<Utc>> {
        self.date_utc().and_then(parse_release_date)
    }

    /// Guarantee a `dateUTC` field, deriving it from `date` when missing.
    ///
    /// A truthy `dateUTC` is left exactly as published.
    pub fn normalize(mut self, policy: DatePolicy) -> Result<Self> {
        if self.0.get(DATE_UTC_FIELD).is_some_and(is_truthy) {
            return Ok(self);
        }
        let raw = self
            .0
            .get(DATE_FIELD)
            .filter(|value| is_truthy(value))
            .map(value_text);
        let derived = match raw {
            Some(raw) => {
                let derived = normalize_release_date(&raw);
                if derived == INVALID_DATE && policy == DatePolicy::Strict {
                    return Err(anyhow!("release date {raw:?} is not a recognizable date"));
                }
                derived
            }
            None if policy == DatePolicy::Strict => {
                return Err(anyhow!("release metadata has neither dateUTC nor date"));
            }
            None => INVALID_DATE.to_string(),
        };
        self.0
            .insert(DATE_UTC_FIELD.to_string(), Value::String(derived));
        Ok(self)
    }
}

/// Where a release document was loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataOrigin {
    Local(PathBuf),
    Remote(String),
}

/// Resolves `(name, version)` to a parsed release document.
pub struct MetadataSource<'a> {
    paths: &'a SitePaths,
    dist_root: &'a str,
    remote: &'a dyn RemoteStore,
}

impl<'a> MetadataSource<'a> {
    pub fn new(paths: &'a SitePaths, dist_root: &'a str, remote: &'a dyn RemoteStore) -> Self {
        Self {
            paths,
            dist_root,
            remote,
        }
    }

    /// Load the document for `name` at `version`, local copy first.
    pub fn load(&self, name: &str, version: &str) -> Result<(ReleaseMetadata, MetadataOrigin)> {
        let local = self.paths.local_metadata_path(name, version);
        if local.exists() {
            tracing::info!(
                dist = name,
                version,
                path = %local.display(),
                "using local dist.json"
            );
            let text = fs::read_to_string(&local)
                .with_context(|| format!("read {}", local.display()))?;
            let metadata = ReleaseMetadata::from_json(&text)
                .with_context(|| format!("parse {}", local.display()))?;
            return Ok((metadata, MetadataOrigin::Local(local)));
        }

        let key = remote_metadata_key(self.dist_root, name, version);
        tracing::info!(
            dist = name,
            version,
            from = %self.remote.describe(),
            "fetching dist.json from {}",
            self.dist_root
        );
        let text = self
            .remote
            .cat(&key)
            .with_context(|| format!("fetch dist.json for {name} {version}"))?;
        let metadata =
            ReleaseMetadata::from_json(&text).with_context(|| format!("parse {key}"))?;
        tracing::debug!(dist = name, fields = metadata.fields().len(), "parsed remote dist.json");
        Ok((metadata, MetadataOrigin::Remote(key)))
    }
}

/// Null, `false`, zero, and empty strings count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
#[path = "metadata_tests.rs"]
mod tests;
