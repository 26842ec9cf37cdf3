//! Package-level relationships part (`_rels/.rels`).

use crate::info::CoreInfo;
use crate::nuspec::manifest_part_name;
use crate::opc::constants::{namespace, part_name, relationship_type};
use crate::xml::{Document, Element};

/// A single relationship from the package to one of its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "Re0")
    pub r_id: String,

    /// Relationship type URI
    pub reltype: String,

    /// Absolute part reference, starting with `/`
    pub target: String,
}

impl Relationship {
    pub fn new<I, T, R>(r_id: I, reltype: T, target: R) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        R: Into<String>,
    {
        Self {
            r_id: r_id.into(),
            reltype: reltype.into(),
            target: target.into(),
        }
    }

    fn to_element(&self) -> Element {
        Element::new("Relationship")
            .with_attr("Type", self.reltype.as_str())
            .with_attr("Target", self.target.as_str())
            .with_attr("Id", self.r_id.as_str())
    }
}

/// The two relationships every package declares: manifest and core properties.
pub fn package_relationships(core: &CoreInfo) -> [Relationship; 2] {
    [
        Relationship::new(
            "Re0",
            relationship_type::MANIFEST,
            format!("/{}", manifest_part_name(core)),
        ),
        Relationship::new(
            "Re1",
            relationship_type::CORE_PROPERTIES,
            format!("/{}", part_name::CORE_PROPERTIES),
        ),
    ]
}

/// Build the relationships document.
pub fn relationships_document(core: &CoreInfo) -> Document {
    Document::new(
        Element::new("Relationships")
            .with_attr("xmlns", namespace::OPC_RELATIONSHIPS)
            .with_children(package_relationships(core).iter().map(Relationship::to_element)),
    )
}
