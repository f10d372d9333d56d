//! Quote persistence.

use crate::error::Result;
use crate::model::SavedQuote;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Storage for saved quotes, newest first.
pub trait QuoteStore {
    /// All saved quotes, newest first.
    fn load(&self) -> Result<Vec<SavedQuote>>;

    /// Add a quote to the front of the history.
    fn append(&mut self, quote: SavedQuote) -> Result<()>;

    /// Remove the quote with `id`. Returns false if there was none.
    fn remove(&mut self, id: &str) -> Result<bool>;

    /// Look up a single quote.
    fn get(&self, id: &str) -> Result<Option<SavedQuote>> {
        Ok(self.load()?.into_iter().find(|q| q.id == id))
    }
}

/// On-disk document layout.
#[derive(Debug, Default, Serialize, Deserialize)]
struct QuoteDocument {
    #[serde(default)]
    quotes: Vec<SavedQuote>,
}

/// Quote store backed by a single JSON file.
///
/// The file holds `{ "quotes": [...] }`. A missing file reads as an empty
/// history and is created on the first write. Writes go to a temporary file
/// in the same directory which then replaces the history in one rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at `path`. Nothing is read until the first call.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<QuoteDocument> {
        if !self.path.exists() {
            debug!("No quote store at {}, starting empty", self.path.display());
            return Ok(QuoteDocument::default());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(QuoteDocument::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_document(&self, document: &QuoteDocument) -> Result<()> {
        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                parent
            }
            None => Path::new("."),
        };
        let json = serde_json::to_string_pretty(document)?;

        let mut staged = NamedTempFile::new_in(dir)?;
        staged.write_all(json.as_bytes())?;
        staged.as_file().sync_all()?;
        staged.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl QuoteStore for JsonFileStore {
    fn load(&self) -> Result<Vec<SavedQuote>> {
        Ok(self.read_document()?.quotes)
    }

    fn append(&mut self, quote: SavedQuote) -> Result<()> {
        let mut document = self.read_document()?;
        info!("Saving quote {} to {}", quote.id, self.path.display());
        document.quotes.insert(0, quote);
        self.write_document(&document)
    }

    fn remove(&mut self, id: &str) -> Result<bool> {
        let mut document = self.read_document()?;
        let before = document.quotes.len();
        document.quotes.retain(|q| q.id != id);
        if document.quotes.len() == before {
            return Ok(false);
        }
        info!("Deleted quote {} from {}", id, self.path.display());
        self.write_document(&document)?;
        Ok(true)
    }
}
