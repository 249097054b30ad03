// Patron Registry - Core Library
// Exposes all modules for use in the CLI and tests

pub mod entities;       // Patron record + field rules
pub mod error;          // Error taxonomy
pub mod import;         // Import line format + summary
pub mod logging;        // tracing subscriber setup
pub mod menu;           // Interactive text menu
pub mod registry;       // In-memory patron store

#[cfg(feature = "cli")]
pub mod config;         // Command-line arguments

// Re-export commonly used types
pub use entities::{
    format_fine, validate_fine, validate_id, Patron, ID_LENGTH, MAX_FINE, MIN_FINE,
};
pub use error::{RegistryError, Result, ValidationError};
pub use import::{split_fields, ImportFailure, ImportReport, ImportSummary, FIELD_DELIMITER, IMPORT_COLUMNS};
pub use menu::{Menu, MenuOption};
pub use registry::{PatronRegistry, EMPTY_LISTING};

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
