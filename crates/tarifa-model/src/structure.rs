//! Structure entries describing how each section/subsection selector is built.
//!
//! A structure row names a section (`Hogar`, `Movil`, ...) and one of its
//! subsections (`nuevo`, `cartera`, ...), and tells the UI which component
//! renders it and which catalog rows it may offer.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Component used to render a subsection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentType {
    /// Home bundle selector with inner Trio/Duo/Uno tabs.
    HomeGroup,
    /// Multi-line mobile selector.
    MovilGroup,
    /// Single selector filtered by structure prefixes (default `T`).
    Trio,
    /// Single selector driven by toggle options.
    Duo,
    /// Single selector driven by toggle options.
    Uno,
    /// Single selector filtered by structure prefixes.
    #[default]
    Generic,
}

impl ComponentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::HomeGroup => "home_group",
            ComponentType::MovilGroup => "movil_group",
            ComponentType::Trio => "trio",
            ComponentType::Duo => "duo",
            ComponentType::Uno => "uno",
            ComponentType::Generic => "generic",
        }
    }

    /// Unknown or blank component names fall back to `Generic`.
    pub fn parse_lenient(value: &str) -> Self {
        value.parse().unwrap_or(ComponentType::Generic)
    }

    /// True when the subsection tracks an ordered list of lines.
    pub fn is_multi_line(&self) -> bool {
        matches!(self, ComponentType::MovilGroup)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "home_group" => Ok(ComponentType::HomeGroup),
            "movil_group" => Ok(ComponentType::MovilGroup),
            "trio" => Ok(ComponentType::Trio),
            "duo" => Ok(ComponentType::Duo),
            "uno" => Ok(ComponentType::Uno),
            "generic" => Ok(ComponentType::Generic),
            _ => Err(ModelError::UnknownVariant {
                kind: "component type",
                value: s.to_string(),
            }),
        }
    }
}

/// One button of a segmented toggle: a key and the prefixes it offers.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToggleOption {
    pub key: String,
    pub prefixes: Vec<String>,
}

impl ToggleOption {
    pub fn new(key: impl Into<String>, prefixes: Vec<String>) -> Self {
        Self {
            key: key.into(),
            prefixes,
        }
    }

    /// Button caption: separators become spaces and each word is capitalised
    /// (`fibra_tv` -> `Fibra Tv`).
    pub fn label(&self) -> String {
        self.key
            .replace(['_', '-'], " ")
            .split(' ')
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Inner tab of a home bundle selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HomeKind {
    #[default]
    Trio,
    Duo,
    Uno,
}

impl HomeKind {
    pub const ALL: [HomeKind; 3] = [HomeKind::Trio, HomeKind::Duo, HomeKind::Uno];

    pub fn as_str(&self) -> &'static str {
        match self {
            HomeKind::Trio => "trio",
            HomeKind::Duo => "duo",
            HomeKind::Uno => "uno",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HomeKind::Trio => "Trio",
            HomeKind::Duo => "Duo",
            HomeKind::Uno => "Uno",
        }
    }

    /// Toggle buttons offered by the inner tab. Trio has a single list.
    pub fn toggle_options(&self) -> Vec<ToggleOption> {
        let pairs: &[(&str, &str)] = match self {
            HomeKind::Trio => &[],
            HomeKind::Duo => &[("fibra_tv", "DT"), ("fibra_fijo", "DF"), ("tv_fijo", "DTF")],
            HomeKind::Uno => &[("fibra", "F"), ("tv", "TV"), ("fijo", "FI")],
        };
        pairs
            .iter()
            .map(|(key, prefix)| ToggleOption::new(*key, vec![(*prefix).to_string()]))
            .collect()
    }
}

impl FromStr for HomeKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trio" => Ok(HomeKind::Trio),
            "duo" => Ok(HomeKind::Duo),
            "uno" => Ok(HomeKind::Uno),
            _ => Err(ModelError::UnknownVariant {
                kind: "home kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Per-line product family of a mobile line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineMode {
    #[default]
    Multi,
    Datos,
    Voz,
}

impl LineMode {
    pub const ALL: [LineMode; 3] = [LineMode::Multi, LineMode::Datos, LineMode::Voz];

    /// Role name used as key in `MultiPrefixes`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineMode::Multi => "multi",
            LineMode::Datos => "datos",
            LineMode::Voz => "voz",
        }
    }
}

impl FromStr for LineMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "multi" => Ok(LineMode::Multi),
            "datos" => Ok(LineMode::Datos),
            "voz" => Ok(LineMode::Voz),
            _ => Err(ModelError::UnknownVariant {
                kind: "line mode",
                value: s.to_string(),
            }),
        }
    }
}

/// One row of the `structure` sheet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructureEntry {
    pub section: String,
    pub subsection: String,
    pub component_type: ComponentType,
    pub prefixes: Vec<String>,
    pub toggle_options: Vec<ToggleOption>,
    /// Line mode role (`multi`, `datos`, `voz`) to catalog prefix.
    pub multi_prefixes: BTreeMap<String, String>,
    pub max_additional_lines: usize,
    /// Primary-line code to the extra plan offered on additional lines.
    pub extra_mapping: BTreeMap<String, String>,
}

impl StructureEntry {
    pub fn new(
        section: impl Into<String>,
        subsection: impl Into<String>,
        component_type: ComponentType,
    ) -> Self {
        Self {
            section: section.into(),
            subsection: subsection.into(),
            component_type,
            ..Self::default()
        }
    }

    pub fn prefix_for_mode(&self, mode: LineMode) -> Option<&str> {
        self.multi_prefixes
            .get(mode.as_str())
            .map(String::as_str)
            .filter(|prefix| !prefix.is_empty())
    }

    /// Captions of the selector's toggles: configured line modes for
    /// multi-line products, every inner tab with its buttons for home bundles.
    pub fn toggle_captions(&self) -> Vec<String> {
        if self.component_type.is_multi_line() {
            return LineMode::ALL
                .into_iter()
                .filter(|mode| self.prefix_for_mode(*mode).is_some())
                .map(|mode| mode.as_str().to_string())
                .collect();
        }
        if self.component_type == ComponentType::HomeGroup {
            return HomeKind::ALL
                .into_iter()
                .map(|kind| {
                    let buttons: Vec<String> =
                        kind.toggle_options().iter().map(ToggleOption::label).collect();
                    if buttons.is_empty() {
                        kind.label().to_string()
                    } else {
                        format!("{}: {}", kind.label(), buttons.join(" / "))
                    }
                })
                .collect();
        }
        self.toggle_options.iter().map(ToggleOption::label).collect()
    }
}
