//! Boundary validation for every externally supplied value
//!
//! - `input`: URL, free-text argument and database identifier validators.
//!   Pure functions: no I/O, no state, deterministic.
//! - `path_guard`: resolves caller-supplied file references inside a trusted
//!   root and proves containment before any read.
//!
//! A rejection short-circuits the calling operation before a process is
//! spawned or a directory is created.

pub mod input;
pub mod path_guard;

pub use input::{
    InputError, validate_cli_arg, validate_config_file, validate_db_id, validate_url,
};
pub use path_guard::{PathGuard, PathGuardError};
