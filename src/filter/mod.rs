// src/filter/mod.rs
// =============================================================================
// This module decides which discovered links get crawled.
//
// Submodules:
// - candidate: parses an href into scheme/host/path/query/fragment
// - policy: the same-domain rules and the rewrite onto the root's origin
// =============================================================================

mod candidate;
mod policy;

pub use candidate::CandidateUrl;
pub use policy::follow;
