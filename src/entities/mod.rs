// Entity Models
//
// Each entity has:
// - Stable identity that NEVER changes
// - Values that are validated on every write

pub mod patron;

pub use patron::{
    format_fine, validate_fine, validate_id, Patron, ID_LENGTH, MAX_FINE, MIN_FINE,
    RECORD_SEPARATOR,
};
