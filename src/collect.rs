//! Input collection: the publications to report on, the candidate auxiliary
//! files produced elsewhere in the build, and the header metadata.
//!
//! Collection only gathers paths and metadata; no file contents are read at
//! this stage, since descriptor and POM files may be produced by build steps
//! that have not run yet. An empty publication list is a valid collection
//! result here; the skip decision belongs to the generation step.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::publication::{CandidateAuxFile, Publication, PublishedArtifact};

/// Identity lines for the manifest header.
#[derive(Debug, Clone)]
pub struct ProjectInfo {
    pub name: String,
    pub group: String,
    pub version: String,
}

/// Build-environment lines for the manifest header.
///
/// `runtime` is the key prefix for the `<runtime>.version` and
/// `<runtime>.vendor` lines.
#[derive(Debug, Clone)]
pub struct BuildEnvironment {
    pub build_tool: String,
    pub runtime: String,
    pub runtime_version: String,
    pub runtime_vendor: String,
    pub os_name: String,
}

impl Default for BuildEnvironment {
    fn default() -> Self {
        BuildEnvironment {
            build_tool: "gradle".to_string(),
            runtime: "java".to_string(),
            runtime_version: String::new(),
            runtime_vendor: String::new(),
            os_name: env::consts::OS.to_string(),
        }
    }
}

/// Fully-collected, immutable inputs for one manifest generation run.
#[derive(Debug, Clone)]
pub struct BuildInputs {
    pub project: ProjectInfo,
    pub environment: BuildEnvironment,
    /// Marketplace/VCS URL; takes precedence over the primary publication's
    /// developer connection for the header `source.scm.uri`.
    pub vcs_url: Option<String>,
    pub publications: Vec<Publication>,
    pub module_candidates: Vec<CandidateAuxFile>,
    pub pom_candidates: Vec<CandidateAuxFile>,
    /// Resolved output location (explicit from config, or the default
    /// `build/buildinfo/<name>-<version>.buildinfo` under the config root).
    pub output_path: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ConfigToml {
    project: ProjectToml,
    environment: Option<EnvironmentToml>,
    vcs_url: Option<String>,
    #[serde(default)]
    publication: Vec<PublicationToml>,
    candidates: Option<CandidatesToml>,
    output: Option<OutputToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct ProjectToml {
    name: String,
    group: String,
    version: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct EnvironmentToml {
    build_tool: Option<String>,
    runtime: Option<String>,
    runtime_version: Option<String>,
    runtime_vendor: Option<String>,
    os_name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PublicationToml {
    name: String,
    group_id: String,
    artifact_id: String,
    version: String,
    developer_connection: Option<String>,
    #[serde(default)]
    artifacts: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct CandidatesToml {
    #[serde(default)]
    module_files: Vec<String>,
    #[serde(default)]
    pom_files: Vec<String>,
    #[serde(default)]
    scan_dirs: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct OutputToml {
    path: String,
}

/// Loads and resolves a generation config from a TOML file.
///
/// Relative paths in the config resolve against the config file's directory.
pub fn load_config(config_path: &Path) -> Result<BuildInputs> {
    let raw = fs::read_to_string(config_path)
        .with_context(|| format!("reading buildinfo config '{}'", config_path.display()))?;
    let parsed: ConfigToml = toml::from_str(&raw)
        .with_context(|| format!("parsing buildinfo config '{}'", config_path.display()))?;
    let config_dir = config_path.parent().unwrap_or_else(|| Path::new("."));
    build_inputs(parsed, config_dir, config_path)
}

fn build_inputs(parsed: ConfigToml, config_dir: &Path, config_path: &Path) -> Result<BuildInputs> {
    if parsed.project.name.trim().is_empty() {
        bail!(
            "invalid buildinfo config '{}': project.name must not be empty",
            config_path.display()
        );
    }
    if parsed.project.version.trim().is_empty() {
        bail!(
            "invalid buildinfo config '{}': project.version must not be empty",
            config_path.display()
        );
    }

    let project = ProjectInfo {
        name: parsed.project.name,
        group: parsed.project.group,
        version: parsed.project.version,
    };

    let defaults = BuildEnvironment::default();
    let environment = match parsed.environment {
        Some(env) => BuildEnvironment {
            build_tool: env.build_tool.unwrap_or(defaults.build_tool),
            runtime: env.runtime.unwrap_or(defaults.runtime),
            runtime_version: env.runtime_version.unwrap_or(defaults.runtime_version),
            runtime_vendor: env.runtime_vendor.unwrap_or(defaults.runtime_vendor),
            os_name: env.os_name.unwrap_or(defaults.os_name),
        },
        None => defaults,
    };

    let mut publications = Vec::new();
    for pub_toml in parsed.publication {
        if pub_toml.name.trim().is_empty() {
            bail!(
                "invalid buildinfo config '{}': publication name must not be empty",
                config_path.display()
            );
        }
        if pub_toml.group_id.trim().is_empty() || pub_toml.artifact_id.trim().is_empty() {
            bail!(
                "invalid buildinfo config '{}': publication '{}' must set group-id and artifact-id",
                config_path.display(),
                pub_toml.name
            );
        }
        let artifacts = pub_toml
            .artifacts
            .iter()
            .map(|raw| PublishedArtifact::from_path(resolve_path(config_dir, raw)))
            .collect();
        publications.push(
            Publication::new(
                pub_toml.group_id,
                pub_toml.artifact_id,
                pub_toml.version,
                pub_toml.name,
                artifacts,
            )
            .with_developer_connection(pub_toml.developer_connection),
        );
    }

    let mut module_candidates = Vec::new();
    let mut pom_candidates = Vec::new();
    if let Some(candidates) = parsed.candidates {
        for raw in &candidates.module_files {
            module_candidates.push(CandidateAuxFile::new(resolve_path(config_dir, raw)));
        }
        for raw in &candidates.pom_files {
            pom_candidates.push(CandidateAuxFile::new(resolve_path(config_dir, raw)));
        }
        for raw in &candidates.scan_dirs {
            let dir = resolve_path(config_dir, raw);
            scan_candidate_dir(&dir, &mut module_candidates, &mut pom_candidates)?;
        }
    }

    let output_path = match parsed.output {
        Some(output) => resolve_path(config_dir, &output.path),
        None => default_output_path(config_dir, &project),
    };

    Ok(BuildInputs {
        project,
        environment,
        vcs_url: parsed.vcs_url,
        publications,
        module_candidates,
        pom_candidates,
        output_path,
    })
}

/// Default output location: `build/buildinfo/<name>-<version>.buildinfo`
/// under the config root.
pub fn default_output_path(config_dir: &Path, project: &ProjectInfo) -> PathBuf {
    config_dir
        .join("build")
        .join("buildinfo")
        .join(format!("{}-{}.buildinfo", project.name, project.version))
}

fn resolve_path(config_dir: &Path, raw: &str) -> PathBuf {
    let candidate = Path::new(raw);
    if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        config_dir.join(candidate)
    }
}

/// Walks a directory the build writes publication metadata into, collecting
/// `module.json` files as module candidates and `pom*.xml` files as POM
/// candidates. A missing directory is not an error; the producing steps may
/// simply not have run yet.
fn scan_candidate_dir(
    dir: &Path,
    module_candidates: &mut Vec<CandidateAuxFile>,
    pom_candidates: &mut Vec<CandidateAuxFile>,
) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }

    let mut modules = Vec::new();
    let mut poms = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry
            .with_context(|| format!("scanning candidate directory '{}'", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name == "module.json" {
            modules.push(entry.path().to_path_buf());
        } else if name.starts_with("pom") && name.ends_with(".xml") {
            poms.push(entry.path().to_path_buf());
        }
    }

    // Walk order is not guaranteed; keep candidate order deterministic.
    modules.sort();
    poms.sort();
    module_candidates.extend(modules.into_iter().map(CandidateAuxFile::new));
    pom_candidates.extend(poms.into_iter().map(CandidateAuxFile::new));
    Ok(())
}
