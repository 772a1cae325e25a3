//! Rendering of the buildinfo text document.
//!
//! The key set, ordering, and blank-line section breaks are a compatibility
//! contract with downstream reproducible-builds tooling and must not change.
//! Rendering is a pure function of the collected inputs and the current file
//! bytes; two runs over identical inputs produce byte-identical output.

use anyhow::{bail, Context, Result};
use std::path::Path;

use crate::collect::BuildInputs;
use crate::file_info::FileInfo;
use crate::matching::{find_module_file, find_pom_file};
use crate::publication::Publication;

/// Format version emitted in the first header line.
pub const BUILDINFO_FORMAT_VERSION: &str = "1.0-SNAPSHOT";

/// Fixed line terminator; a platform-dependent separator would break
/// cross-platform reproducibility of the manifest itself.
const NL: &str = "\n";

/// Renders the complete buildinfo document for the collected inputs.
///
/// The first publication is the primary one; its coordinates and source
/// connection populate the header. A configured VCS URL takes precedence
/// over the primary publication's developer connection.
pub fn render(inputs: &BuildInputs) -> Result<String> {
    let Some(primary) = inputs.publications.first() else {
        bail!("cannot render buildinfo without any publications");
    };

    let mut output = render_header(inputs, primary);
    for (pub_no, publication) in inputs.publications.iter().enumerate() {
        render_publication(&mut output, inputs, publication, pub_no)?;
    }
    Ok(output)
}

fn render_header(inputs: &BuildInputs, primary: &Publication) -> String {
    let scm_uri = inputs
        .vcs_url
        .as_deref()
        .or(primary.developer_connection.as_deref())
        .unwrap_or("");
    let project = &inputs.project;
    let env = &inputs.environment;

    format!(
        "buildinfo.version={format_version}{NL}\
         {NL}\
         name={name}{NL}\
         group-id={group}{NL}\
         artifact-id={artifact_id}{NL}\
         version={version}{NL}\
         {NL}\
         build-tool={build_tool}{NL}\
         {NL}\
         {runtime}.version={runtime_version}{NL}\
         {runtime}.vendor={runtime_vendor}{NL}\
         os.name={os_name}{NL}\
         {NL}\
         source.scm.uri={scm_uri}{NL}\
         source.scm.tag={version}{NL}\
         {NL}",
        format_version = BUILDINFO_FORMAT_VERSION,
        name = project.name,
        group = project.group,
        artifact_id = primary.artifact_id,
        version = project.version,
        build_tool = env.build_tool,
        runtime = env.runtime,
        runtime_version = env.runtime_version,
        runtime_vendor = env.runtime_vendor,
        os_name = env.os_name,
        scm_uri = scm_uri,
    )
}

fn render_publication(
    output: &mut String,
    inputs: &BuildInputs,
    publication: &Publication,
    pub_no: usize,
) -> Result<()> {
    output.push_str(&format!(
        "outputs.{}.coordinates={}{NL}",
        pub_no,
        publication.coordinates()
    ));

    // Rewritten auxiliary filenames carry the project version, which can
    // differ from the publication's own version field.
    let mut art_no = 0;
    if let Some(pom_file) = find_pom_file(publication, &inputs.pom_candidates) {
        let filename = format!("{}-{}.pom", publication.artifact_id, inputs.project.version);
        render_output_entry(output, pub_no, art_no, pom_file, &filename)?;
        art_no += 1;
    }
    if let Some(module_file) = find_module_file(publication, &inputs.module_candidates) {
        let filename = format!(
            "{}-{}.module",
            publication.artifact_id, inputs.project.version
        );
        render_output_entry(output, pub_no, art_no, module_file, &filename)?;
        art_no += 1;
    }
    // Artifacts are already sorted by path at publication construction.
    for artifact in &publication.artifacts {
        render_output_entry(output, pub_no, art_no, &artifact.path, &artifact.filename)?;
        art_no += 1;
    }
    Ok(())
}

fn render_output_entry(
    output: &mut String,
    pub_no: usize,
    art_no: usize,
    file: &Path,
    filename: &str,
) -> Result<()> {
    let info = FileInfo::capture(file).with_context(|| {
        format!(
            "capturing output info for publication {} entry {}",
            pub_no, art_no
        )
    })?;
    let prefix = format!("outputs.{}.{}", pub_no, art_no);
    output.push_str(&format!(
        "{prefix}.filename={filename}{NL}\
         {prefix}.length={size}{NL}\
         {prefix}.checksums.sha512={sha512}{NL}",
        size = info.size,
        sha512 = info.sha512,
    ));
    Ok(())
}
