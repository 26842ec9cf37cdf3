/// Constant values related to the Open Packaging Convention as used by NuGet packages.
///
/// This module contains content type URIs (like MIME-types) that specify a part's format,
/// XML namespaces, relationship types, and the fixed part names every package carries.

/// Content type URIs (like MIME-types) that specify a part's format
pub mod content_type {
    pub const OPC_CORE_PROPERTIES: &str =
        "application/vnd.openxmlformats-package.core-properties+xml";
    pub const OPC_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";

    /// Fallback for any extension without a known mapping
    pub const OCTET: &str = "application/octet";
}

/// XML namespace URIs
pub mod namespace {
    pub const OPC_CONTENT_TYPES: &str =
        "http://schemas.openxmlformats.org/package/2006/content-types";
    pub const OPC_RELATIONSHIPS: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships";
    pub const OPC_CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";

    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const DC_TERMS: &str = "http://purl.org/dc/terms/";
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";

    pub const NUSPEC: &str = "http://schemas.microsoft.com/packaging/2011/10/nuspec.xsd";
}

/// Relationship type URIs used in NuGet packages
pub mod relationship_type {
    pub const MANIFEST: &str = "http://schemas.microsoft.com/packaging/2010/07/manifest";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
}

/// Fixed archive entry names
pub mod part_name {
    /// The content type map, always written last
    pub const CONTENT_TYPES: &str = "[Content_Types].xml";

    /// Package-level relationships
    pub const PACKAGE_RELS: &str = "_rels/.rels";

    /// Core properties document
    pub const CORE_PROPERTIES: &str = "package/services/metadata/core-properties/coreProp.psmdcp";
}

/// Value written to `lastModifiedBy` in the core properties
pub const LAST_MODIFIED_BY: &str = "nupack";
