pub mod candidate;

pub use candidate::{Candidate, CandidateProfile, UpsertOutcome};
