//! Reproducible-builds `.buildinfo` manifest generation.
//!
//! Given a set of publications (coordinate triple plus published artifact
//! files), candidate auxiliary files produced elsewhere in the build (module
//! descriptors, POM files), and build-environment metadata, this crate
//! renders the deterministic key=value buildinfo text format: coordinates,
//! filenames, byte lengths, and SHA-512 checksums per output group.
//!
//! The core is a plain data pipeline in three stages:
//!
//! - **Input collection** ([`collect`]) - publications and candidate
//!   auxiliary files, gathered once into immutable inputs; paths only, no
//!   file contents.
//! - **Matching** ([`matching`]) - auxiliary files are associated with their
//!   owning publication by parent-directory-name convention.
//! - **Rendering** ([`render`]) - per-file integrity records and the final
//!   versioned text document.
//!
//! This is a build-time reporting utility, not a build orchestrator: it only
//! reports what exists, and it neither validates nor signs artifacts. Build
//! system integration is a thin adapter (the `buildinfo-gen` binary) that
//! populates [`collect::BuildInputs`] from a TOML config and writes the
//! output atomically.

pub mod collect;
pub mod file_info;
pub mod generate;
pub mod matching;
pub mod publication;
pub mod render;

pub use collect::{load_config, BuildEnvironment, BuildInputs, ProjectInfo};
pub use file_info::FileInfo;
pub use generate::{generate_buildinfo, GenerateOutcome, SKIP_NO_PUBLICATIONS};
pub use publication::{CandidateAuxFile, Publication, PublishedArtifact};
pub use render::{render, BUILDINFO_FORMAT_VERSION};
