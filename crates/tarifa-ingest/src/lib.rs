//! Catalog and structure ingestion.
//!
//! - **normalization**: spreadsheet cell normalization (`normalize_number`)
//! - **csv**: sheet reading and header alias resolution
//! - **catalog**: `catalog` sheet to [`CatalogRow`](tarifa_model::CatalogRow)s
//! - **structure**: `structure` sheet to [`StructureEntry`](tarifa_model::StructureEntry)s
//! - **discovery**: locating both sheets inside a data directory

pub mod catalog;
pub mod csv;
pub mod discovery;
pub mod error;
pub mod normalization;
pub mod structure;

pub use catalog::{CatalogLoad, load_catalog, parse_catalog};
pub use discovery::{DATA_DIR_ENV_VAR, DataFiles, LoadedData, discover_data_files, load_data_dir};
pub use error::{IngestError, Result};
pub use normalization::{normalize_number, renormalize};
pub use structure::{
    default_structure, load_structure, parse_extra_mapping, parse_multi_prefixes,
    parse_prefix_list, parse_structure, parse_toggle_options,
};
