// 📚 Patron Registry - in-memory keyed store
//
// Owns every Patron. Callers only ever borrow records.
//
// Guarantees:
// - no two patrons share an id
// - create/update either fully apply or change nothing
// - import keeps going past bad lines and reports each one

use crate::entities::{validate_id, Patron};
use crate::error::{RegistryError, Result, ValidationError};
use crate::import::{split_fields, ImportSummary, IMPORT_COLUMNS};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Message shown when listing an empty registry
pub const EMPTY_LISTING: &str = "No patrons found.";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

// ============================================================================
// PATRON REGISTRY
// ============================================================================

/// Registry of all patrons, keyed by id
///
/// Listing order is ascending id. Mutation needs `&mut self`, so the
/// duplicate check in `create` and the insert cannot be interleaved.
#[derive(Debug, Default)]
pub struct PatronRegistry {
    patrons: BTreeMap<String, Patron>,
}

impl PatronRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        PatronRegistry {
            patrons: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.patrons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patrons.is_empty()
    }

    /// All patrons in id order
    pub fn iter(&self) -> impl Iterator<Item = &Patron> {
        self.patrons.values()
    }

    /// True only for a well-formed id that is present; never errors
    pub fn exists(&self, id: &str) -> bool {
        validate_id(id).is_ok_and(|id| self.patrons.contains_key(id))
    }

    /// Raise the format error for a malformed id, independent of presence
    pub fn validate_id_format(&self, id: &str) -> std::result::Result<(), ValidationError> {
        validate_id(id).map(|_| ())
    }

    /// Add a new patron
    ///
    /// Fails with `AlreadyExists` when the id is taken, otherwise with the
    /// first validation error of the id or fine.
    pub fn create(&mut self, id: &str, name: &str, address: &str, fine: &str) -> Result<()> {
        let key = id.trim();
        if self.patrons.contains_key(key) {
            return Err(RegistryError::AlreadyExists { id: key.to_string() });
        }

        let patron = Patron::new(id, name, address, fine)?;
        tracing::debug!(id = patron.id(), "created patron");
        self.patrons.insert(patron.id().to_string(), patron);

        Ok(())
    }

    /// Look up a patron by id
    pub fn retrieve(&self, id: &str) -> Result<&Patron> {
        let key = id.trim();
        self.patrons
            .get(key)
            .ok_or_else(|| RegistryError::NotFound { id: key.to_string() })
    }

    /// Replace each field whose new value is not blank
    ///
    /// The fine is validated before anything is written, so a bad fine
    /// leaves the patron untouched. All-blank input is a successful no-op.
    pub fn update(&mut self, id: &str, name: &str, address: &str, fine: &str) -> Result<()> {
        let key = id.trim();
        let patron = self
            .patrons
            .get_mut(key)
            .ok_or_else(|| RegistryError::NotFound { id: key.to_string() })?;

        if !is_blank(fine) {
            patron.set_fine(fine)?;
        }
        if !is_blank(name) {
            patron.set_name(name);
        }
        if !is_blank(address) {
            patron.set_address(address);
        }

        tracing::debug!(id = key, "updated patron");
        Ok(())
    }

    /// Remove a patron, handing back the removed record
    pub fn delete(&mut self, id: &str) -> Result<Patron> {
        let key = id.trim();
        let removed = self
            .patrons
            .remove(key)
            .ok_or_else(|| RegistryError::NotFound { id: key.to_string() })?;

        tracing::debug!(id = key, "deleted patron");
        Ok(removed)
    }

    /// Every patron's rendered block, each followed by a newline
    pub fn list_all(&self) -> String {
        if self.is_empty() {
            return EMPTY_LISTING.to_string();
        }

        self.patrons
            .values()
            .map(|patron| format!("{}\n", patron.render()))
            .collect()
    }

    // ========================================================================
    // BULK IMPORT
    // ========================================================================

    /// Create one patron per `id-name-address-fine` line
    ///
    /// A bad line is recorded and skipped. A line that cannot be read is
    /// recorded as `<unreadable line N>`; invalid UTF-8 skips just that line,
    /// any other read error ends the import.
    pub fn import_lines<I>(&mut self, lines: I) -> ImportSummary
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        let mut summary = ImportSummary::new();

        for (index, line) in lines.into_iter().enumerate() {
            let line_number = index + 1;

            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::warn!(line_number, error = %err, "could not read import line");
                    summary.record_failure(
                        line_number,
                        format!("<unreadable line {}>", line_number),
                        err.to_string(),
                    );
                    if err.kind() == io::ErrorKind::InvalidData {
                        continue;
                    }
                    break;
                }
            };

            match self.import_line(&line) {
                Ok(()) => summary.record_success(),
                Err(err) => {
                    tracing::warn!(
                        line_number,
                        line = %line,
                        kind = ?err.validation(),
                        reason = %err,
                        "import line rejected"
                    );
                    summary.record_failure(line_number, line, err.to_string());
                }
            }
        }

        tracing::info!(
            lines = summary.total(),
            imported = summary.imported,
            failed = summary.failures.len(),
            "import finished"
        );
        summary
    }

    /// Import every line of a text file
    ///
    /// Only an unopenable file fails the whole call.
    pub fn import_file(&mut self, path: &Path) -> Result<ImportSummary> {
        let file = File::open(path).map_err(RegistryError::Io)?;
        if file.metadata().map_err(RegistryError::Io)?.is_dir() {
            return Err(RegistryError::Io(io::Error::other(format!(
                "{} is a directory",
                path.display()
            ))));
        }

        tracing::info!(path = %path.display(), "importing patrons");
        Ok(self.import_lines(BufReader::new(file).lines()))
    }

    fn import_line(&mut self, line: &str) -> Result<()> {
        let fields = split_fields(line);
        if fields.len() != IMPORT_COLUMNS {
            return Err(RegistryError::ColumnCount { found: fields.len() });
        }

        self.create(
            fields[0].trim(),
            fields[1].trim(),
            fields[2].trim(),
            fields[3].trim(),
        )
    }
}

// ============================================================================
// TESTS
// ============================================================================
