//! Core properties part (`coreProp.psmdcp`).
//!
//! Mirrors what NuGet clients expect to find: creator, description, identifier,
//! version, an empty keywords element, the id repeated as title, and the tool
//! marker in `lastModifiedBy`.

use crate::error::{PackError, Result};
use crate::info::CoreInfo;
use crate::opc::constants::{LAST_MODIFIED_BY, namespace};
use crate::xml::{Document, Element};

/// Build the core properties document.
///
/// # Errors
///
/// Returns [`PackError::MissingVersion`] if `core.version` is `None`.
pub fn core_properties_document(core: &CoreInfo) -> Result<Document> {
    let version = core
        .version
        .as_deref()
        .ok_or_else(|| PackError::MissingVersion {
            id: core.id.clone(),
        })?;

    let root = Element::new("coreProperties")
        .with_attr("xmlns", namespace::OPC_CORE_PROPERTIES)
        .with_attr("xmlns:dc", namespace::DC)
        .with_attr("xmlns:dcterms", namespace::DC_TERMS)
        .with_attr("xmlns:xsi", namespace::XSI)
        .with_child(Element::text_node("dc:creator", core.authors.join(", ")))
        .with_child(Element::text_node("dc:description", core.description.as_str()))
        .with_child(Element::text_node("dc:identifier", core.id.as_str()))
        .with_child(Element::text_node("version", version))
        .with_child(Element::text_node("keywords", ""))
        .with_child(Element::text_node("dc:title", core.id.as_str()))
        .with_child(Element::text_node("lastModifiedBy", LAST_MODIFIED_BY));

    Ok(Document::new(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_properties() {
        let core = CoreInfo::new(
            "Foo",
            Some("2.1.0".into()),
            "desc",
            vec!["A".into(), "B".into()],
        );
        let doc = core_properties_document(&core).unwrap();
        let root = doc.root();

        assert_eq!(root.attr("xmlns"), Some(namespace::OPC_CORE_PROPERTIES));
        assert_eq!(root.attr("xmlns:dc"), Some(namespace::DC));
        let names: Vec<&str> = root.children().iter().map(|c| c.name()).collect();
        assert_eq!(
            names,
            vec![
                "dc:creator",
                "dc:description",
                "dc:identifier",
                "version",
                "keywords",
                "dc:title",
                "lastModifiedBy"
            ]
        );
        assert_eq!(root.child("dc:creator").unwrap().text(), Some("A, B"));
        assert_eq!(root.child("dc:title").unwrap().text(), Some("Foo"));
        assert_eq!(root.child("version").unwrap().text(), Some("2.1.0"));
        assert_eq!(root.child("lastModifiedBy").unwrap().text(), Some("nupack"));

        let xml = doc.to_xml().unwrap();
        assert!(xml.contains("<keywords/>"));
    }

    #[test]
    fn test_missing_version() {
        let core = CoreInfo::new("Foo", None, "desc", vec!["A".into()]);
        assert!(matches!(
            core_properties_document(&core),
            Err(PackError::MissingVersion { .. })
        ));
    }
}
