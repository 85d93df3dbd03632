use serde::{Deserialize, Serialize};

use crate::models::Candidate;
use crate::parser::schema::{optional_text, optional_years, string_list};

/// Typed form of a recruiter's free-text query. Produced per search, never stored.
///
/// Set fields are combined with AND; unset fields impose no constraint.
/// `job_title` and `industry` are carried for display and do not filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateFilter {
    /// Matches a candidate holding any of these skills (case-insensitive).
    #[serde(default, deserialize_with = "string_list")]
    pub skills: Vec<String>,
    /// Inclusive lower bound on `experience_years`.
    #[serde(default, deserialize_with = "optional_years")]
    pub min_experience_years: Option<i32>,
    /// Case-insensitive substring of the candidate's location.
    #[serde(default, deserialize_with = "optional_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    pub industry: Option<String>,
}

impl CandidateFilter {
    /// Lower-cased, de-duplicated skill terms in first-seen order.
    pub fn normalized_skills(&self) -> Vec<String> {
        let mut seen = Vec::<String>::new();
        for skill in &self.skills {
            let skill = skill.trim().to_lowercase();
            if !skill.is_empty() && !seen.contains(&skill) {
                seen.push(skill);
            }
        }
        seen
    }

    pub fn is_unconstrained(&self) -> bool {
        self.normalized_skills().is_empty()
            && self.min_experience_years.is_none()
            && self.location.is_none()
    }

    /// Reference predicate for the filter semantics. Store backends must agree with it.
    pub fn matches(&self, candidate: &Candidate) -> bool {
        let skills = self.normalized_skills();
        if !skills.is_empty() {
            let has_any = candidate
                .skills
                .iter()
                .any(|s| skills.contains(&s.trim().to_lowercase()));
            if !has_any {
                return false;
            }
        }

        if let Some(min) = self.min_experience_years {
            match candidate.experience_years {
                Some(years) if years >= min => {}
                _ => return false,
            }
        }

        if let Some(location) = &self.location {
            let needle = location.to_lowercase();
            let found = candidate
                .location
                .as_deref()
                .map(|l| l.to_lowercase().contains(&needle))
                .unwrap_or(false);
            if !found {
                return false;
            }
        }

        true
    }
}
