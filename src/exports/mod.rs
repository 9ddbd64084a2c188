//! Ephemeral export directories
//!
//! - `driver`: one bounded Tool invocation plus an inventory of its output
//! - `manager`: registry, population cap and the export/read operations
//! - `eviction`: TTL sweep of the registry and of the export root
//! - `reader`: filtered, paginated CSV reads behind the path guard

pub mod driver;
pub mod eviction;
pub mod manager;
pub mod reader;
pub mod types;

pub use driver::ExportDriver;
pub use manager::ExportManager;
pub use types::{
    ExportRequest, ExportSummary, ExportedFile, Page, ReadRequest, RowFilter, SweepReport,
};
