//! Association of auxiliary files with their owning publication.
//!
//! The association is a naming convention: a candidate belongs to the
//! publication whose `name` equals the candidate's immediate parent directory
//! name. This is a heuristic; if a build lays out multiple publications under
//! colliding directory names, the first existing match wins. Existence is
//! checked here rather than at collection time, because descriptor files may
//! be generated between collection and matching.

use std::path::Path;

use crate::publication::{CandidateAuxFile, Publication};

/// Finds the module-descriptor file belonging to `publication`, if any.
///
/// No match is not an error; the corresponding manifest lines are simply
/// omitted.
pub fn find_module_file<'a>(
    publication: &Publication,
    candidates: &'a [CandidateAuxFile],
) -> Option<&'a Path> {
    find_owned_candidate(&publication.name, candidates)
}

/// Finds the POM/manifest file belonging to `publication`, if any.
pub fn find_pom_file<'a>(
    publication: &Publication,
    candidates: &'a [CandidateAuxFile],
) -> Option<&'a Path> {
    find_owned_candidate(&publication.name, candidates)
}

fn find_owned_candidate<'a>(
    publication_name: &str,
    candidates: &'a [CandidateAuxFile],
) -> Option<&'a Path> {
    candidates
        .iter()
        .filter(|candidate| candidate.path.is_file())
        .find(|candidate| candidate.owner_name() == Some(publication_name))
        .map(|candidate| candidate.path.as_path())
}
