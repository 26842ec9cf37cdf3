//! Package description: required identity plus optional descriptive fields.
//!
//! Both structs are plain data with builder-style setters. They derive serde so
//! a caller can load them from a template file in whatever format it prefers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity every package must carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreInfo {
    pub id: String,
    /// Required at write time; absence is reported as [`crate::PackError::MissingVersion`].
    pub version: Option<String>,
    pub description: String,
    pub authors: Vec<String>,
    /// File name of the produced archive, relative to the output directory.
    pub package_file_name: String,
    /// Archive entry name of the manifest document.
    pub manifest_file_name: String,
}

impl CoreInfo {
    /// Create core info with conventional file names.
    ///
    /// The package file name defaults to `<id>.<version>.nupkg` (or `<id>.nupkg`
    /// without a version) and the manifest to `<id>.nuspec`.
    pub fn new<I, D>(id: I, version: Option<String>, description: D, authors: Vec<String>) -> Self
    where
        I: Into<String>,
        D: Into<String>,
    {
        let id = id.into();
        let package_file_name = match &version {
            Some(version) => format!("{id}.{version}.nupkg"),
            None => format!("{id}.nupkg"),
        };
        let manifest_file_name = format!("{id}.nuspec");

        Self {
            id,
            version,
            description: description.into(),
            authors,
            package_file_name,
            manifest_file_name,
        }
    }

    pub fn package_file_name<S: Into<String>>(mut self, name: S) -> Self {
        self.package_file_name = name.into();
        self
    }

    pub fn manifest_file_name<S: Into<String>>(mut self, name: S) -> Self {
        self.manifest_file_name = name.into();
        self
    }
}

/// A package dependency with an already formatted version requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub id: String,
    /// Version range in manifest syntax, e.g. `[1.0, 2.0)`. Empty means "any".
    pub version: String,
}

impl Dependency {
    pub fn new<I: Into<String>, V: Into<String>>(id: I, version: V) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
        }
    }
}

/// A framework assembly the package needs from the GAC.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkAssemblyReference {
    pub assembly_name: String,
    #[serde(default)]
    pub target_frameworks: Vec<String>,
}

impl FrameworkAssemblyReference {
    pub fn new<S: Into<String>>(assembly_name: S, target_frameworks: Vec<String>) -> Self {
        Self {
            assembly_name: assembly_name.into(),
            target_frameworks,
        }
    }
}

/// A source path (relative to the working directory) and its target folder in the archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMapping {
    pub source: String,
    pub target: String,
}

impl FileMapping {
    pub fn new<S: Into<String>, T: Into<String>>(source: S, target: T) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Everything else a manifest may describe.
///
/// Scalar fields are `Option`s so that absent values produce no element at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionalInfo {
    pub title: Option<String>,
    pub owners: Vec<String>,
    pub release_notes: Option<String>,
    pub summary: Option<String>,
    pub language: Option<String>,
    pub project_url: Option<String>,
    pub icon_url: Option<String>,
    pub license_url: Option<String>,
    pub copyright: Option<String>,
    pub require_license_acceptance: bool,
    pub tags: Vec<String>,
    pub development_dependency: bool,
    pub references: Vec<String>,
    pub framework_assembly_references: Vec<FrameworkAssemblyReference>,
    pub dependencies: Vec<Dependency>,
    /// Dependency ids left out of the manifest.
    pub excluded_dependencies: BTreeSet<String>,
    pub files: Vec<FileMapping>,
    /// Glob patterns, relative to the working directory, of paths to leave out.
    pub files_excluded: Vec<String>,
}

impl OptionalInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn owners<I: IntoIterator<Item = S>, S: Into<String>>(mut self, owners: I) -> Self {
        self.owners = owners.into_iter().map(Into::into).collect();
        self
    }

    pub fn release_notes(mut self, notes: &str) -> Self {
        self.release_notes = Some(notes.to_string());
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.summary = Some(summary.to_string());
        self
    }

    pub fn language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }

    pub fn project_url(mut self, url: &str) -> Self {
        self.project_url = Some(url.to_string());
        self
    }

    pub fn icon_url(mut self, url: &str) -> Self {
        self.icon_url = Some(url.to_string());
        self
    }

    pub fn license_url(mut self, url: &str) -> Self {
        self.license_url = Some(url.to_string());
        self
    }

    pub fn copyright(mut self, copyright: &str) -> Self {
        self.copyright = Some(copyright.to_string());
        self
    }

    pub fn require_license_acceptance(mut self, required: bool) -> Self {
        self.require_license_acceptance = required;
        self
    }

    pub fn tags<I: IntoIterator<Item = S>, S: Into<String>>(mut self, tags: I) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn development_dependency(mut self, dev: bool) -> Self {
        self.development_dependency = dev;
        self
    }

    /// Add an assembly reference (`<reference file="..."/>`).
    pub fn reference(mut self, file: &str) -> Self {
        self.references.push(file.to_string());
        self
    }

    pub fn framework_assembly(mut self, reference: FrameworkAssemblyReference) -> Self {
        self.framework_assembly_references.push(reference);
        self
    }

    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependencies.push(dependency);
        self
    }

    pub fn exclude_dependency(mut self, id: &str) -> Self {
        self.excluded_dependencies.insert(id.to_string());
        self
    }

    /// Map `source` (file or directory) to the `target` folder in the archive.
    pub fn file(mut self, source: &str, target: &str) -> Self {
        self.files.push(FileMapping::new(source, target));
        self
    }

    pub fn exclude(mut self, pattern: &str) -> Self {
        self.files_excluded.push(pattern.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_info_default_file_names() {
        let core = CoreInfo::new("Foo", Some("1.0.0".into()), "d", vec!["me".into()]);
        assert_eq!(core.package_file_name, "Foo.1.0.0.nupkg");
        assert_eq!(core.manifest_file_name, "Foo.nuspec");

        let core = CoreInfo::new("Foo", None, "d", vec!["me".into()]);
        assert_eq!(core.package_file_name, "Foo.nupkg");
    }

    #[test]
    fn test_core_info_overrides() {
        let core = CoreInfo::new("Foo", Some("1.0.0".into()), "d", vec!["me".into()])
            .package_file_name("out.zip")
            .manifest_file_name("meta/Foo.nuspec");
        assert_eq!(core.package_file_name, "out.zip");
        assert_eq!(core.manifest_file_name, "meta/Foo.nuspec");
    }

    #[test]
    fn test_optional_info_builder() {
        let info = OptionalInfo::new()
            .title("Foo")
            .tags(["a", "b"])
            .dependency(Dependency::new("Bar", "[1.0]"))
            .exclude_dependency("Baz")
            .file("bin", "lib")
            .exclude("bin/*.pdb");

        assert_eq!(info.title.as_deref(), Some("Foo"));
        assert_eq!(info.tags, vec!["a", "b"]);
        assert_eq!(info.dependencies.len(), 1);
        assert!(info.excluded_dependencies.contains("Baz"));
        assert_eq!(info.files, vec![FileMapping::new("bin", "lib")]);
        assert_eq!(info.files_excluded, vec!["bin/*.pdb"]);
        assert!(info.summary.is_none());
    }

    #[test]
    fn test_optional_info_deserializes_with_defaults() {
        let info: OptionalInfo = serde_json::from_str(
            r#"{ "title": "T", "files": [{ "source": "bin", "target": "lib" }] }"#,
        )
        .unwrap();
        assert_eq!(info.title.as_deref(), Some("T"));
        assert_eq!(info.files.len(), 1);
        assert!(info.owners.is_empty());
        assert!(!info.require_license_acceptance);
    }
}
