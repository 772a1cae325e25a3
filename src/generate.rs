//! Generation driver: skip/write decision and atomic output.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::collect::BuildInputs;
use crate::render::render;

/// Skip reason reported when the collected inputs contain no publications.
pub const SKIP_NO_PUBLICATIONS: &str = "no publications to base buildinfo on";

/// Result of one generation run.
///
/// A skip is an expected, non-error outcome (no publishing configuration or
/// an empty publication list) and is reported distinctly from a failure so
/// automation can branch on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Skipped { reason: String },
    Written { path: PathBuf },
}

/// Generates the buildinfo manifest for the collected inputs.
///
/// With zero publications the run is skipped and no output file is touched.
/// Otherwise the document is rendered in full first and then moved into
/// place atomically, so a failed run never leaves a partial manifest that
/// could be mistaken for a complete one.
pub fn generate_buildinfo(inputs: &BuildInputs) -> Result<GenerateOutcome> {
    if inputs.publications.is_empty() {
        return Ok(GenerateOutcome::Skipped {
            reason: SKIP_NO_PUBLICATIONS.to_string(),
        });
    }

    let document = render(inputs)?;
    write_atomic(&inputs.output_path, &document)
        .with_context(|| format!("writing buildinfo '{}'", inputs.output_path.display()))?;
    Ok(GenerateOutcome::Written {
        path: inputs.output_path.clone(),
    })
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let parent = path
        .parent()
        .ok_or_else(|| anyhow!("output path without parent '{}'", path.display()))?;
    fs::create_dir_all(parent)
        .with_context(|| format!("creating output directory '{}'", parent.display()))?;
    let tmp = path.with_extension(format!("tmp-{}", std::process::id()));
    fs::write(&tmp, content)
        .with_context(|| format!("writing temp file '{}'", tmp.display()))?;
    fs::rename(&tmp, path).with_context(|| {
        format!(
            "renaming temp file '{}' to '{}'",
            tmp.display(),
            path.display()
        )
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::{BuildEnvironment, ProjectInfo};
    use crate::publication::{Publication, PublishedArtifact};
    use std::fs;
    use tempfile::TempDir;

    fn inputs(publications: Vec<Publication>, output_path: PathBuf) -> BuildInputs {
        BuildInputs {
            project: ProjectInfo {
                name: "widget".to_string(),
                group: "com.example".to_string(),
                version: "1.0".to_string(),
            },
            environment: BuildEnvironment::default(),
            vcs_url: None,
            publications,
            module_candidates: vec![],
            pom_candidates: vec![],
            output_path,
        }
    }

    #[test]
    fn zero_publications_skips_without_writing() {
        let tmp = TempDir::new().unwrap();
        let output_path = tmp.path().join("build/buildinfo/widget-1.0.buildinfo");

        let outcome = generate_buildinfo(&inputs(vec![], output_path.clone())).unwrap();
        assert_eq!(
            outcome,
            GenerateOutcome::Skipped {
                reason: SKIP_NO_PUBLICATIONS.to_string()
            }
        );
        assert!(!output_path.exists());
    }

    #[test]
    fn writes_manifest_into_fresh_directory() {
        let tmp = TempDir::new().unwrap();
        let jar_path = tmp.path().join("widget-1.0.jar");
        fs::write(&jar_path, b"hello").unwrap();
        let output_path = tmp.path().join("build/buildinfo/widget-1.0.buildinfo");

        let publication = Publication::new(
            "com.example",
            "widget",
            "1.0",
            "mavenJava",
            vec![PublishedArtifact::from_path(jar_path)],
        );
        let outcome =
            generate_buildinfo(&inputs(vec![publication], output_path.clone())).unwrap();
        assert_eq!(
            outcome,
            GenerateOutcome::Written {
                path: output_path.clone()
            }
        );

        let written = fs::read_to_string(&output_path).unwrap();
        assert!(written.starts_with("buildinfo.version=1.0-SNAPSHOT\n"));
        assert!(written.contains("outputs.0.0.filename=widget-1.0.jar\n"));
    }

    #[test]
    fn rerun_over_existing_output_directory_succeeds() {
        let tmp = TempDir::new().unwrap();
        let jar_path = tmp.path().join("widget-1.0.jar");
        fs::write(&jar_path, b"hello").unwrap();
        let output_path = tmp.path().join("build/buildinfo/widget-1.0.buildinfo");

        let publication = Publication::new(
            "com.example",
            "widget",
            "1.0",
            "mavenJava",
            vec![PublishedArtifact::from_path(jar_path)],
        );
        let run = inputs(vec![publication], output_path.clone());
        generate_buildinfo(&run).unwrap();
        let first = fs::read_to_string(&output_path).unwrap();
        generate_buildinfo(&run).unwrap();
        let second = fs::read_to_string(&output_path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn failed_render_leaves_no_output_file() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("widget-1.0.jar");
        let output_path = tmp.path().join("build/buildinfo/widget-1.0.buildinfo");

        let publication = Publication::new(
            "com.example",
            "widget",
            "1.0",
            "mavenJava",
            vec![PublishedArtifact::from_path(missing)],
        );
        let err = generate_buildinfo(&inputs(vec![publication], output_path.clone()));
        assert!(err.is_err());
        assert!(!output_path.exists());
    }
}
