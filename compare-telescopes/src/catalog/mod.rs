//! Named telescopes and cameras.
//!
//! The catalog maps a gear name (case-insensitive) to the partial attribute set
//! a user would otherwise type by hand. A built-in table ships with the binary;
//! an optional JSON file in the same format adds local gear. The catalog is
//! loaded once and handed to the input layer; nothing here is global.
//!
//! # File format
//!
//! ```json
//! {
//!     "scopes":  { "ED80":   { "d": 80, "l": 600 } },
//!     "cameras": { "ASI120": { "h": 1280, "v": 960, "p": 3.75, "q": 0.80 } }
//! }
//! ```
//!
//! Scope keys: `d` aperture [mm], `di` aperture [inch], `l` focal length [mm],
//! `f` focal ratio, `o` obstruction ratio, `t` transmittance.
//! Camera keys: `h`/`v` pixels, `p` pixel size [μm], `q` QE, `r` reducer factor
//! applied to the telescope it is attached to. Any other key is descriptive.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::hardware::{RawCamera, RawTelescope};

/// Built-in gear table
const DEFAULT_GEAR_JSON: &str = include_str!("gear.json");

/// File name looked up next to the executable when no path is given
pub const GEAR_FILE_NAME: &str = "telescopes-and-cameras.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("{0} is an unknown telescope")]
    UnknownTelescope(String),

    #[error("{0} is an unknown camera")]
    UnknownCamera(String),

    #[error("Failed to read gear file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid gear data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Catalog entry for a telescope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScopeEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub d: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub di: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub l: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub f: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub o: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t: Option<f64>,
    /// Manufacturer, type, aliases and other descriptive fields
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ScopeEntry {
    /// Substitute this entry into a raw telescope.
    ///
    /// The optics (aperture, length, ratio, obstruction) are replaced as a
    /// whole; reducer and transmittance given by the user are kept unless the
    /// entry names a transmittance.
    pub fn apply(&self, raw: RawTelescope) -> RawTelescope {
        RawTelescope {
            aperture_diameter_mm: nonzero(self.d),
            aperture_diameter_in: nonzero(self.di),
            focal_length_mm: nonzero(self.l),
            focal_ratio: nonzero(self.f),
            obstruction_ratio: nonzero(self.o),
            transmittance_factor: nonzero(self.t).or(raw.transmittance_factor),
            ..raw
        }
    }
}

/// Catalog entry for a camera
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub p: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<f64>,
    /// Reducer or extender factor of the camera's optical path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<f64>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CameraEntry {
    /// Substitute this entry into a raw camera; binning is kept
    pub fn apply(&self, raw: RawCamera) -> RawCamera {
        RawCamera {
            horizontal_pixels: self.h.filter(|&h| h != 0),
            vertical_pixels: self.v.filter(|&v| v != 0),
            pixel_size_um: nonzero(self.p),
            quantum_efficiency: nonzero(self.q),
            ..raw
        }
    }

    /// Reducer this camera imposes on its telescope
    pub fn reducer(&self) -> Option<f64> {
        nonzero(self.r)
    }
}

/// Zero means "not given" in gear data and on the command line
pub fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|&v| v != 0.0)
}

/// One source of gear data, as laid out on disk
#[derive(Debug, Clone, Default)]
pub struct GearData {
    pub scopes: BTreeMap<String, ScopeEntry>,
    pub cameras: BTreeMap<String, CameraEntry>,
    /// The document as written, keys in file order
    source: Value,
}

#[derive(Deserialize)]
struct GearTables {
    #[serde(default)]
    scopes: BTreeMap<String, ScopeEntry>,
    #[serde(default)]
    cameras: BTreeMap<String, CameraEntry>,
}

impl GearData {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let source: Value = serde_json::from_str(json)?;
        let tables = GearTables::deserialize(&source)?;
        Ok(Self {
            scopes: tables.scopes,
            cameras: tables.cameras,
            source,
        })
    }

    /// Fields of one entry exactly as the source spelled them
    fn fields(&self, table: &str, name: &str) -> Map<String, Value> {
        match &self.source[table][name] {
            Value::Object(fields) => fields.clone(),
            _ => Map::new(),
        }
    }
}

/// A catalog entry together with its fields as written, for listings
#[derive(Debug, Clone)]
struct Listed<T> {
    entry: T,
    fields: Map<String, Value>,
}

/// Immutable lookup table of known telescopes and cameras
#[derive(Debug, Clone)]
pub struct Catalog {
    default_data: GearData,
    file_data: Option<GearData>,
    scopes: HashMap<String, Listed<ScopeEntry>>,
    cameras: HashMap<String, Listed<CameraEntry>>,
}

impl Catalog {
    /// Catalog holding only the built-in gear
    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::from_sources(
            GearData::from_json(DEFAULT_GEAR_JSON)?,
            None,
        ))
    }

    /// Built-in gear plus the user file at `path`, if it exists
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let default_data = GearData::from_json(DEFAULT_GEAR_JSON)?;
        if !path.is_file() {
            return Ok(Self::from_sources(default_data, None));
        }

        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file_data = GearData::from_json(&json)?;
        info!(
            "Loaded {} scopes and {} cameras from {}",
            file_data.scopes.len(),
            file_data.cameras.len(),
            path.display()
        );
        Ok(Self::from_sources(default_data, Some(file_data)))
    }

    /// Merge two sources. Built-in entries shadow user entries of the same name.
    pub fn from_sources(default_data: GearData, file_data: Option<GearData>) -> Self {
        let mut scopes = HashMap::new();
        let mut cameras = HashMap::new();

        for (data, builtin) in file_data
            .iter()
            .map(|file| (file, false))
            .chain([(&default_data, true)])
        {
            for (name, entry) in &data.scopes {
                let listed = Listed {
                    entry: entry.clone(),
                    fields: data.fields("scopes", name),
                };
                if scopes.insert(name.to_lowercase(), listed).is_some() && builtin {
                    warn!("Built-in telescope {name} shadows the one in the gear file");
                }
            }
            for (name, entry) in &data.cameras {
                let listed = Listed {
                    entry: entry.clone(),
                    fields: data.fields("cameras", name),
                };
                if cameras.insert(name.to_lowercase(), listed).is_some() && builtin {
                    warn!("Built-in camera {name} shadows the one in the gear file");
                }
            }
        }

        Self {
            default_data,
            file_data,
            scopes,
            cameras,
        }
    }

    /// Look up a telescope by name, ignoring case
    pub fn scope(&self, name: &str) -> Result<&ScopeEntry, CatalogError> {
        self.scopes
            .get(&name.to_lowercase())
            .map(|listed| &listed.entry)
            .ok_or_else(|| CatalogError::UnknownTelescope(name.to_string()))
    }

    /// Look up a camera by name, ignoring case
    pub fn camera(&self, name: &str) -> Result<&CameraEntry, CatalogError> {
        self.cameras
            .get(&name.to_lowercase())
            .map(|listed| &listed.entry)
            .ok_or_else(|| CatalogError::UnknownCamera(name.to_string()))
    }

    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    pub fn camera_count(&self) -> usize {
        self.cameras.len()
    }

    /// One line per entry, scopes then cameras, each sorted by name.
    ///
    /// Fields appear in the order the source wrote them, numbers as written.
    pub fn list_lines(&self) -> Vec<String> {
        let mut lines = listing(&self.scopes);
        lines.extend(listing(&self.cameras));
        lines
    }

    /// Both sources as JSON with sorted keys and 4-space indent
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let default_json = pretty(&sort_keys(&self.default_data.source))?;
        let file_json = match &self.file_data {
            Some(file) => pretty(&sort_keys(&file.source))?,
            None => pretty(&Value::Null)?,
        };
        Ok(format!(
            "Default data:\n{default_json}\nCustom data:\n{file_json}"
        ))
    }
}

fn listing<T>(entries: &HashMap<String, Listed<T>>) -> Vec<String> {
    let mut names: Vec<&String> = entries.keys().collect();
    names.sort();

    names
        .into_iter()
        .map(|name| {
            let mut line = format!("{name:15}");
            for (key, value) in &entries[name].fields {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                line.push_str(&format!(" --{key:2} {value:<6}"));
            }
            line
        })
        .collect()
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(fields) => {
            let mut sorted: Vec<(&String, &Value)> = fields.iter().collect();
            sorted.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn pretty(value: &Value) -> Result<String, CatalogError> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Default location of the user gear file: beside the running executable
pub fn default_gear_file() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    Some(exe.parent()?.join(GEAR_FILE_NAME))
}
