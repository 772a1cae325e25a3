//! Data model for the publications being reported on.

use std::path::{Path, PathBuf};

/// One logical group of artifacts to report, e.g. one Maven coordinate set.
///
/// Constructed by the build-system adapter before generation starts and
/// treated as immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct Publication {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Identifier used only to associate auxiliary files with this
    /// publication by directory-naming convention; distinct from the
    /// coordinate triple.
    pub name: String,
    pub artifacts: Vec<PublishedArtifact>,
    /// Source-control URI; only the first collected publication's value can
    /// end up in the manifest header.
    pub developer_connection: Option<String>,
}

impl Publication {
    /// Builds a publication, normalizing its artifact list: deduplicated by
    /// filesystem path and sorted by path ascending so downstream rendering
    /// order never depends on input order.
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
        name: impl Into<String>,
        mut artifacts: Vec<PublishedArtifact>,
    ) -> Self {
        artifacts.sort_by(|a, b| a.path.cmp(&b.path));
        artifacts.dedup_by(|a, b| a.path == b.path);
        Publication {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
            name: name.into(),
            artifacts,
            developer_connection: None,
        }
    }

    pub fn with_developer_connection(mut self, uri: Option<String>) -> Self {
        self.developer_connection = uri;
        self
    }

    /// The `<group>:<artifact>` pair identifying this publication's output
    /// group in the manifest.
    pub fn coordinates(&self) -> String {
        format!("{}:{}", self.group_id, self.artifact_id)
    }
}

/// One primary output file of a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedArtifact {
    pub path: PathBuf,
    /// Filename to record in the manifest; defaults to the path's final
    /// component.
    pub filename: String,
}

impl PublishedArtifact {
    pub fn from_path(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|part| part.to_string_lossy().into_owned())
            .unwrap_or_default();
        PublishedArtifact { path, filename }
    }
}

/// A file produced elsewhere in the build that may belong to a publication
/// (a module descriptor or a POM/manifest file).
///
/// Ownership is inferred from the name of the immediate parent directory,
/// which by convention equals a publication's `name`. The file may not exist
/// yet when the candidate is collected; existence is only checked at match
/// time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateAuxFile {
    pub path: PathBuf,
}

impl CandidateAuxFile {
    pub fn new(path: PathBuf) -> Self {
        CandidateAuxFile { path }
    }

    /// The owning-publication name implied by this candidate's location, if
    /// the path has a named parent directory.
    pub fn owner_name(&self) -> Option<&str> {
        self.path
            .parent()
            .and_then(Path::file_name)
            .and_then(|part| part.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(path: &str) -> PublishedArtifact {
        PublishedArtifact::from_path(PathBuf::from(path))
    }

    #[test]
    fn artifacts_are_sorted_and_deduplicated_by_path() {
        let publication = Publication::new(
            "com.example",
            "widget",
            "1.0",
            "mavenJava",
            vec![
                artifact("build/libs/widget-1.0-sources.jar"),
                artifact("build/libs/widget-1.0.jar"),
                artifact("build/libs/widget-1.0-sources.jar"),
            ],
        );

        let paths: Vec<&Path> = publication
            .artifacts
            .iter()
            .map(|a| a.path.as_path())
            .collect();
        assert_eq!(
            paths,
            vec![
                Path::new("build/libs/widget-1.0-sources.jar"),
                Path::new("build/libs/widget-1.0.jar"),
            ]
        );
    }

    #[test]
    fn filename_defaults_to_final_path_component() {
        let a = artifact("build/libs/widget-1.0.jar");
        assert_eq!(a.filename, "widget-1.0.jar");
    }

    #[test]
    fn coordinates_join_group_and_artifact() {
        let publication = Publication::new("com.example", "widget", "1.0", "mavenJava", vec![]);
        assert_eq!(publication.coordinates(), "com.example:widget");
    }

    #[test]
    fn owner_name_is_parent_directory() {
        let candidate =
            CandidateAuxFile::new(PathBuf::from("build/publications/mavenJava/module.json"));
        assert_eq!(candidate.owner_name(), Some("mavenJava"));
    }
}
