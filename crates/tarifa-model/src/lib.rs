//! Data model for the catalog-driven plan selector.
//!
//! The types here are plain values: catalog rows and structure entries loaded
//! from the spreadsheet sheets, the contract form filled in by the sales agent,
//! and the options that tune contract assembly. Behaviour lives in
//! `tarifa-core`; loading lives in `tarifa-ingest`.

pub mod catalog;
pub mod cell;
pub mod contract;
pub mod error;
pub mod options;
pub mod structure;

pub use catalog::CatalogRow;
pub use cell::{CellValue, format_amount};
pub use contract::{ContractForm, PickupMode, Portability, TemplateKind};
pub use error::{ModelError, Result};
pub use options::{CONFIG_ENV_VAR, ContractOptions, DEFAULT_MAX_ADDITIONAL};
pub use structure::{ComponentType, HomeKind, LineMode, StructureEntry, ToggleOption};
