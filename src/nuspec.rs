//! Manifest (`.nuspec`) document builder.

use crate::error::{PackError, Result};
use crate::info::{CoreInfo, Dependency, FrameworkAssemblyReference, OptionalInfo};
use crate::opc::constants::namespace;
use crate::opc::packuri::normalize_path;
use crate::xml::{Document, Element};
use std::collections::BTreeSet;

/// Archive entry name of the manifest, without any leading separator.
pub fn manifest_part_name(core: &CoreInfo) -> String {
    normalize_path(&core.manifest_file_name)
        .trim_start_matches('/')
        .to_string()
}

/// Build the manifest document for a package.
///
/// Optional elements are emitted only when their field is present, boolean
/// flags only when true, and the `references`, `frameworkAssemblies` and
/// `dependencies` blocks only when they would have at least one child.
///
/// # Errors
///
/// Returns [`PackError::MissingVersion`] if `core.version` is `None`.
pub fn manifest_document(core: &CoreInfo, optional: &OptionalInfo) -> Result<Document> {
    let version = core
        .version
        .as_deref()
        .ok_or_else(|| PackError::MissingVersion {
            id: core.id.clone(),
        })?;

    let metadata = Element::new("metadata")
        .with_child(Element::text_node("id", core.id.as_str()))
        .with_child(Element::text_node("version", version))
        .with_optional_child(optional_text("title", optional.title.as_deref()))
        .with_child(Element::text_node("authors", core.authors.join(", ")))
        .with_optional_child(joined("owners", &optional.owners, ", "))
        .with_optional_child(optional_text("licenseUrl", optional.license_url.as_deref()))
        .with_optional_child(optional_text("projectUrl", optional.project_url.as_deref()))
        .with_optional_child(optional_text("iconUrl", optional.icon_url.as_deref()))
        .with_optional_child(flag("requireLicenseAcceptance", optional.require_license_acceptance))
        .with_child(Element::text_node("description", core.description.as_str()))
        .with_optional_child(optional_text("summary", optional.summary.as_deref()))
        .with_optional_child(optional_text("releaseNotes", optional.release_notes.as_deref()))
        .with_optional_child(optional_text("copyright", optional.copyright.as_deref()))
        .with_optional_child(optional_text("language", optional.language.as_deref()))
        .with_optional_child(joined("tags", &optional.tags, " "))
        .with_optional_child(flag("developmentDependency", optional.development_dependency))
        .with_optional_child(references_node(&optional.references))
        .with_optional_child(framework_assemblies_node(&optional.framework_assembly_references))
        .with_optional_child(dependencies_node(
            &optional.dependencies,
            &optional.excluded_dependencies,
        ));

    Ok(Document::new(
        Element::new("package")
            .with_attr("xmlns", namespace::NUSPEC)
            .with_child(metadata),
    ))
}

fn optional_text(name: &str, value: Option<&str>) -> Option<Element> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| Element::text_node(name, v))
}

fn joined(name: &str, values: &[String], separator: &str) -> Option<Element> {
    (!values.is_empty()).then(|| Element::text_node(name, values.join(separator)))
}

fn flag(name: &str, value: bool) -> Option<Element> {
    value.then(|| Element::text_node(name, "true"))
}

fn references_node(references: &[String]) -> Option<Element> {
    if references.is_empty() {
        return None;
    }
    Some(
        Element::new("references").with_children(
            references
                .iter()
                .map(|file| Element::new("reference").with_attr("file", file.as_str())),
        ),
    )
}

fn framework_assemblies_node(references: &[FrameworkAssemblyReference]) -> Option<Element> {
    if references.is_empty() {
        return None;
    }
    Some(Element::new("frameworkAssemblies").with_children(references.iter().map(|r| {
        let targets = r.target_frameworks.join(", ");
        Element::new("frameworkAssembly")
            .with_attr("assemblyName", r.assembly_name.as_str())
            .with_optional_attr("targetFramework", Some(targets.as_str()).filter(|t| !t.is_empty()))
    })))
}

fn dependencies_node(dependencies: &[Dependency], excluded: &BTreeSet<String>) -> Option<Element> {
    let included: Vec<Element> = dependencies
        .iter()
        .filter(|d| !excluded.contains(&d.id))
        .map(|d| {
            Element::new("dependency")
                .with_attr("id", d.id.as_str())
                .with_optional_attr("version", Some(d.version.as_str()).filter(|v| !v.is_empty()))
        })
        .collect();

    if included.is_empty() {
        return None;
    }
    Some(Element::new("dependencies").with_children(included))
}
