//! Helper for building `[Content_Types].xml` from the entries actually written.

use crate::opc::constants::{content_type as ct, namespace};
use crate::opc::packuri::extension;
use crate::xml::{Document, Element};
use std::collections::BTreeMap;

/// Extension to content type mapping with `Default` elements only.
///
/// Rows are keyed by lower-cased extension, so `.TXT` and `.txt` collapse into
/// one row, and entries without an extension contribute nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTypes {
    /// Default content types by extension, kept sorted for stable output
    defaults: BTreeMap<String, &'static str>,
}

impl ContentTypes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from a list of archive entry names.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut cti = Self::new();
        for entry in entries {
            cti.add_entry(entry.as_ref());
        }
        cti
    }

    /// Register the extension of one archive entry.
    pub fn add_entry(&mut self, entry: &str) {
        let ext = extension(entry);
        if ext.is_empty() {
            return;
        }
        let content_type = Self::content_type_for(&ext);
        self.defaults.entry(ext).or_insert(content_type);
    }

    /// Known content type for a lower-cased extension, or the generic fallback.
    pub fn content_type_for(ext: &str) -> &'static str {
        match ext {
            "rels" => ct::OPC_RELATIONSHIPS,
            "psmdcp" => ct::OPC_CORE_PROPERTIES,
            _ => ct::OCTET,
        }
    }

    /// Iterate over `(extension, content type)` rows in extension order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.defaults.iter().map(|(k, v)| (k.as_str(), *v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.defaults.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty()
    }

    /// Build the `Types` document.
    pub fn to_document(&self) -> Document {
        Document::new(
            Element::new("Types")
                .with_attr("xmlns", namespace::OPC_CONTENT_TYPES)
                .with_children(self.iter().map(|(ext, content_type)| {
                    Element::new("Default")
                        .with_attr("Extension", ext)
                        .with_attr("ContentType", content_type)
                })),
        )
    }
}
