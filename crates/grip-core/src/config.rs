#![forbid(unsafe_code)]

//! Resize options as supplied by the host, and the normalized per-interaction
//! snapshot ([`ResizeConfig`]).
//!
//! Hosts hand options over as loosely-typed JSON, so decoding is lenient:
//! bounds accept numbers or numeric strings (`"140px"`), edges accept a list,
//! a separated string, or an object of flags, and values of the wrong type
//! degrade to "absent" instead of failing the whole payload.
//!
//! Two layers exist:
//! - flat `resize*` keys (`resizeMinWidth`, `resizeEdges`, ...), and
//! - the `resize` key itself, either a boolean switch or an object whose
//!   keys override the flat ones. An object without `enabled` means enabled.
//!
//! [`ResizeOptions::normalize`] merges both into a [`ResizeConfig`], which is
//! re-derived on every pointer-down so option changes apply to the next
//! interaction only.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::direction::Edges;
use crate::geometry::{Bounds, parse_leading_float};

/// Edge-proximity band used when none (or zero) is configured.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 8.0;

/// Class toggled on the target while a session is active.
pub const DEFAULT_ACTIVE_CLASS: &str = "sortable-resizing";

/// Option payload errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid resize options: {0}")]
    Json(#[from] serde_json::Error),
}

/// One `token → selector` entry of a handle map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleBinding {
    /// Compass token, e.g. `"se"`.
    pub token: String,
    /// Selector matched against the pointer-down target and its ancestors.
    pub selector: String,
}

/// Ordered handle map; the first matching entry wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HandleMap(pub Vec<HandleBinding>);

impl HandleMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    #[must_use]
    pub fn with(mut self, token: impl Into<String>, selector: impl Into<String>) -> Self {
        self.0.push(HandleBinding {
            token: token.into(),
            selector: selector.into(),
        });
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &HandleBinding> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The `resize` key: master switch or detailed overrides.
#[derive(Debug, Clone, PartialEq)]
pub enum ResizeSwitch {
    Toggle(bool),
    Detailed(ResizeOverrides),
}

impl Default for ResizeSwitch {
    fn default() -> Self {
        Self::Toggle(false)
    }
}

/// Keys of a detailed `resize` object.
///
/// Outer `None` means "not given, keep the flat option"; `Some(None)` means
/// explicitly cleared (`null`).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResizeOverrides {
    #[serde(deserialize_with = "present_truthy")]
    pub enabled: Option<bool>,
    #[serde(deserialize_with = "present_selector")]
    pub handle: Option<Option<String>>,
    #[serde(deserialize_with = "present_handles")]
    pub handles: Option<Option<HandleMap>>,
    #[serde(deserialize_with = "present_threshold")]
    pub edge_threshold: Option<Option<f64>>,
    #[serde(deserialize_with = "present_edges")]
    pub edges: Option<Option<Edges>>,
    #[serde(deserialize_with = "present_number")]
    pub min_width: Option<Option<f64>>,
    #[serde(deserialize_with = "present_number")]
    pub min_height: Option<Option<f64>>,
    #[serde(deserialize_with = "present_number")]
    pub max_width: Option<Option<f64>>,
    #[serde(deserialize_with = "present_number")]
    pub max_height: Option<Option<f64>>,
    #[serde(deserialize_with = "present_truthy")]
    pub preserve_aspect_ratio: Option<bool>,
    #[serde(deserialize_with = "present_selector")]
    pub active_class: Option<Option<String>>,
}

/// Host-facing resize options (flat keys plus the `resize` switch).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResizeOptions {
    #[serde(deserialize_with = "switch")]
    pub resize: ResizeSwitch,
    #[serde(deserialize_with = "selector")]
    pub resize_handle: Option<String>,
    #[serde(deserialize_with = "handles")]
    pub resize_handles: Option<HandleMap>,
    /// Parsed strictly: `"12px"` is not a number and falls back to the default.
    #[serde(deserialize_with = "threshold")]
    pub resize_edge_threshold: Option<f64>,
    /// `None` means all four edges.
    #[serde(deserialize_with = "edges")]
    pub resize_edges: Option<Edges>,
    #[serde(deserialize_with = "number")]
    pub resize_min_width: Option<f64>,
    #[serde(deserialize_with = "number")]
    pub resize_min_height: Option<f64>,
    #[serde(deserialize_with = "number")]
    pub resize_max_width: Option<f64>,
    #[serde(deserialize_with = "number")]
    pub resize_max_height: Option<f64>,
    #[serde(deserialize_with = "truthy")]
    pub resize_preserve_aspect_ratio: bool,
    #[serde(deserialize_with = "selector")]
    pub resize_active_class: Option<String>,
}

impl Default for ResizeOptions {
    fn default() -> Self {
        Self {
            resize: ResizeSwitch::default(),
            resize_handle: None,
            resize_handles: None,
            resize_edge_threshold: Some(DEFAULT_EDGE_THRESHOLD),
            resize_edges: Some(Edges::all()),
            resize_min_width: None,
            resize_min_height: None,
            resize_max_width: None,
            resize_max_height: None,
            resize_preserve_aspect_ratio: false,
            resize_active_class: Some(DEFAULT_ACTIVE_CLASS.to_owned()),
        }
    }
}

impl ResizeOptions {
    /// Defaults with the master switch on.
    #[must_use]
    pub fn enabled() -> Self {
        Self {
            resize: ResizeSwitch::Toggle(true),
            ..Self::default()
        }
    }

    /// Decode options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode options from an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Merge flat keys and `resize` overrides into a validated snapshot.
    #[must_use]
    pub fn normalize(&self) -> ResizeConfig {
        let mut enabled = matches!(self.resize, ResizeSwitch::Toggle(true));
        let mut handle = self.resize_handle.clone();
        let mut handles = self.resize_handles.clone();
        let mut edge_threshold = self.resize_edge_threshold;
        let mut edges = self.resize_edges;
        let mut min_width = self.resize_min_width;
        let mut min_height = self.resize_min_height;
        let mut max_width = self.resize_max_width;
        let mut max_height = self.resize_max_height;
        let mut preserve_aspect_ratio = self.resize_preserve_aspect_ratio;
        let mut active_class = self.resize_active_class.clone();

        if let ResizeSwitch::Detailed(overrides) = &self.resize {
            enabled = overrides.enabled.unwrap_or(true);
            override_with(&mut handle, &overrides.handle);
            override_with(&mut handles, &overrides.handles);
            override_with(&mut edge_threshold, &overrides.edge_threshold);
            override_with(&mut edges, &overrides.edges);
            override_with(&mut min_width, &overrides.min_width);
            override_with(&mut min_height, &overrides.min_height);
            override_with(&mut max_width, &overrides.max_width);
            override_with(&mut max_height, &overrides.max_height);
            if let Some(value) = overrides.preserve_aspect_ratio {
                preserve_aspect_ratio = value;
            }
            override_with(&mut active_class, &overrides.active_class);
        }

        ResizeConfig {
            enabled,
            handle: handle.filter(|selector| !selector.is_empty()),
            handles: handles.unwrap_or_default(),
            edge_threshold: edge_threshold.unwrap_or(DEFAULT_EDGE_THRESHOLD),
            edges: edges.unwrap_or_else(Edges::all),
            width: Bounds::new(finite(min_width), finite(max_width)),
            height: Bounds::new(finite(min_height), finite(max_height)),
            preserve_aspect_ratio,
            active_class: active_class.filter(|class| !class.is_empty()),
        }
    }
}

fn override_with<T: Clone>(slot: &mut Option<T>, value: &Option<Option<T>>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

/// Immutable configuration snapshot for one interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeConfig {
    pub enabled: bool,
    /// Single handle selector.
    pub handle: Option<String>,
    /// Directional handle map, consulted before `handle`.
    pub handles: HandleMap,
    /// Edge-proximity band in pixels.
    pub edge_threshold: f64,
    pub edges: Edges,
    pub width: Bounds,
    pub height: Bounds,
    pub preserve_aspect_ratio: bool,
    pub active_class: Option<String>,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        ResizeOptions::default().normalize()
    }
}

impl ResizeConfig {
    /// Default snapshot with resizing switched on.
    #[must_use]
    pub fn enabled() -> Self {
        ResizeOptions::enabled().normalize()
    }

    /// Threshold used for edge detection; zero or NaN fall back to the default.
    #[must_use]
    pub fn effective_edge_threshold(&self) -> f64 {
        if self.edge_threshold == 0.0 || self.edge_threshold.is_nan() {
            DEFAULT_EDGE_THRESHOLD
        } else {
            self.edge_threshold
        }
    }
}

// ── Lenient decoders ────────────────────────────────────────────────────

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_float(s),
        _ => None,
    }
    .filter(|v| !v.is_nan())
}

/// Whole-value numeric conversion: the entire string must be a number,
/// blank strings read as zero, booleans as `0`/`1`.
fn value_to_strict_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_strict_float(s),
        _ => None,
    }
    .filter(|v| !v.is_nan())
}

fn parse_strict_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    match trimmed {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let numeric = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !numeric {
        return None;
    }
    trimmed.parse().ok()
}

fn value_to_selector(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

fn value_to_handles(value: Value) -> Option<HandleMap> {
    let Value::Object(map) = value else {
        return None;
    };
    let bindings = map
        .into_iter()
        .filter_map(|(token, selector)| {
            value_to_selector(selector).map(|selector| HandleBinding { token, selector })
        })
        .collect();
    Some(HandleMap(bindings))
}

fn value_to_edges(value: &Value) -> Option<Edges> {
    if !is_truthy(value) {
        return None;
    }
    let edges = match value {
        Value::Array(items) => Edges::from_names(items.iter().filter_map(Value::as_str)),
        Value::String(list) => Edges::parse_list(list),
        Value::Object(flags) => flags
            .iter()
            .filter(|(_, flag)| is_truthy(flag))
            .filter_map(|(name, _)| Edges::from_edge_name(name))
            .fold(Edges::empty(), |acc, edge| acc | edge),
        _ => Edges::empty(),
    };
    Some(edges)
}

fn switch<'de, D: Deserializer<'de>>(d: D) -> Result<ResizeSwitch, D::Error> {
    let value = Value::deserialize(d)?;
    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map(ResizeSwitch::Detailed)
            .map_err(serde::de::Error::custom),
        other => Ok(ResizeSwitch::Toggle(is_truthy(&other))),
    }
}

fn selector<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(value_to_selector(Value::deserialize(d)?))
}

fn handles<'de, D: Deserializer<'de>>(d: D) -> Result<Option<HandleMap>, D::Error> {
    Ok(value_to_handles(Value::deserialize(d)?))
}

fn number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(value_to_number(&Value::deserialize(d)?))
}

fn threshold<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(value_to_strict_number(&Value::deserialize(d)?))
}

fn edges<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Edges>, D::Error> {
    Ok(value_to_edges(&Value::deserialize(d)?))
}

fn truthy<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(d)?))
}

fn present_truthy<'de, D: Deserializer<'de>>(d: D) -> Result<Option<bool>, D::Error> {
    truthy(d).map(Some)
}

fn present_selector<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<String>>, D::Error> {
    selector(d).map(Some)
}

fn present_handles<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Option<HandleMap>>, D::Error> {
    handles(d).map(Some)
}

fn present_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<f64>>, D::Error> {
    number(d).map(Some)
}

fn present_threshold<'de, D: Deserializer<'de>>(
    d: D,
) -> Result<Option<Option<f64>>, D::Error> {
    threshold(d).map(Some)
}

fn present_edges<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Option<Edges>>, D::Error> {
    edges(d).map(Some)
}
