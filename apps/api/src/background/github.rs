//! Code-hosting reputation: public repos, followers and avatar from the GitHub user API.

use async_trait::async_trait;
use reqwest::{header::USER_AGENT, Client, StatusCode};
use serde::Deserialize;

use super::ScoringError;

/// Host marker a profile URL must contain to be scored.
pub const CODE_HOST_MARKER: &str = "github.com";

const REPO_CAP: u64 = 20;
const FOLLOWER_CAP: u64 = 20;
const POINTS_PER_UNIT: u64 = 2;
const AVATAR_BONUS: u64 = 10;
const MAX_SCORE: u64 = 100;

/// The subset of the user-info payload that feeds the score.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CodeHostProfile {
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    pub avatar_url: Option<String>,
}

/// Fetches public user info by username. Non-success statuses are errors.
#[async_trait]
pub trait CodeHostLookup: Send + Sync {
    async fn user_profile(&self, username: &str) -> Result<CodeHostProfile, ScoringError>;
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl CodeHostLookup for GitHubClient {
    async fn user_profile(&self, username: &str) -> Result<CodeHostProfile, ScoringError> {
        let mut request = self
            .client
            .get(format!("{}/users/{username}", self.api_url))
            .header(USER_AGENT, concat!("hireflow/", env!("CARGO_PKG_VERSION")))
            .header("accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ScoringError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

/// Username is the first path segment after the host marker, e.g.
/// `https://github.com/octocat/` → `octocat`.
pub fn username_from_url(url: &str) -> Option<&str> {
    let start = url.to_ascii_lowercase().find(CODE_HOST_MARKER)? + CODE_HOST_MARKER.len();
    let rest = url[start..].strip_prefix('/')?;
    let path = rest.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .find(|segment| !segment.is_empty())
        .filter(|name| name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'))
}

/// `min(repos, 20)*2 + min(followers, 20)*2 + 10 if avatar`, capped at 100.
pub fn score_profile(profile: &CodeHostProfile) -> u8 {
    let mut score = profile.public_repos.min(REPO_CAP) * POINTS_PER_UNIT
        + profile.followers.min(FOLLOWER_CAP) * POINTS_PER_UNIT;
    if profile
        .avatar_url
        .as_deref()
        .is_some_and(|u| !u.trim().is_empty())
    {
        score += AVATAR_BONUS;
    }
    score.min(MAX_SCORE) as u8
}

/// Scores a profile URL. URLs without the host marker (or without a username) score 0
/// without a lookup; lookup failures are returned for the caller to absorb.
pub async fn code_hosting_score(
    url: Option<&str>,
    lookup: &dyn CodeHostLookup,
) -> Result<u8, ScoringError> {
    let Some(username) = url.and_then(username_from_url) else {
        return Ok(0);
    };
    let profile = lookup.user_profile(username).await?;
    Ok(score_profile(&profile))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory user directory. Unknown users answer 404.
    #[derive(Default)]
    pub(crate) struct FakeLookup {
        pub profiles: HashMap<String, CodeHostProfile>,
        pub calls: Mutex<Vec<String>>,
    }

    impl FakeLookup {
        pub(crate) fn with(username: &str, repos: u64, followers: u64, avatar: bool) -> Self {
            let mut lookup = Self::default();
            lookup.insert(username, repos, followers, avatar);
            lookup
        }

        pub(crate) fn insert(&mut self, username: &str, repos: u64, followers: u64, avatar: bool) {
            self.profiles.insert(
                username.to_string(),
                CodeHostProfile {
                    public_repos: repos,
                    followers,
                    avatar_url: avatar.then(|| format!("https://avatars.example/{username}")),
                },
            );
        }
    }

    #[async_trait]
    impl CodeHostLookup for FakeLookup {
        async fn user_profile(&self, username: &str) -> Result<CodeHostProfile, ScoringError> {
            self.calls.lock().unwrap().push(username.to_string());
            self.profiles
                .get(username)
                .cloned()
                .ok_or(ScoringError::Status(404))
        }
    }

    fn profile(repos: u64, followers: u64, avatar: bool) -> CodeHostProfile {
        CodeHostProfile {
            public_repos: repos,
            followers,
            avatar_url: avatar.then(|| "https://avatars.example/u".to_string()),
        }
    }

    #[test]
    fn test_username_from_url() {
        assert_eq!(username_from_url("https://github.com/octocat"), Some("octocat"));
        assert_eq!(username_from_url("https://github.com/sushtend/"), Some("sushtend"));
        assert_eq!(username_from_url("github.com/jane-doe/dotfiles"), Some("jane-doe"));
        assert_eq!(username_from_url("https://GitHub.com/octocat?tab=repositories"), Some("octocat"));
        assert_eq!(username_from_url("https://github.com/"), None);
        assert_eq!(username_from_url("https://github.com.evil.net/octocat"), None);
        assert_eq!(username_from_url("https://gitlab.com/octocat"), None);
    }

    #[test]
    fn test_score_formula() {
        assert_eq!(score_profile(&profile(0, 0, false)), 0);
        assert_eq!(score_profile(&profile(3, 5, false)), 16);
        assert_eq!(score_profile(&profile(3, 5, true)), 26);
    }

    #[test]
    fn test_score_saturates_at_caps() {
        let saturated = score_profile(&profile(20, 20, true));
        assert_eq!(saturated, 90);
        assert_eq!(score_profile(&profile(500, 10_000, true)), saturated);
    }

    #[test]
    fn test_score_is_monotonic_and_bounded() {
        for avatar in [false, true] {
            for repos in 0..30 {
                for followers in 0..30 {
                    let s = score_profile(&profile(repos, followers, avatar));
                    assert!(s <= 100);
                    assert!(s >= score_profile(&profile(repos.saturating_sub(1), followers, avatar)));
                    assert!(s >= score_profile(&profile(repos, followers.saturating_sub(1), avatar)));
                }
            }
        }
    }

    #[test]
    fn test_blank_avatar_earns_no_bonus() {
        let p = CodeHostProfile {
            avatar_url: Some(String::new()),
            ..profile(1, 1, false)
        };
        assert_eq!(score_profile(&p), 4);
    }

    #[test]
    fn test_profile_payload_deserializes() {
        let json = r#"{"login": "octocat", "public_repos": 8, "followers": 9000, "avatar_url": null}"#;
        let p: CodeHostProfile = serde_json::from_str(json).unwrap();
        assert_eq!(p, profile(8, 9000, false));
    }

    #[tokio::test]
    async fn test_foreign_url_scores_zero_without_lookup() {
        let lookup = FakeLookup::with("octocat", 20, 20, true);
        for url in [None, Some(""), Some("https://linkedin.com/in/octocat")] {
            assert_eq!(code_hosting_score(url, &lookup).await.unwrap(), 0);
        }
        assert!(lookup.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_uses_derived_username() {
        let lookup = FakeLookup::with("octocat", 4, 1, true);
        let score = code_hosting_score(Some("https://github.com/octocat/"), &lookup)
            .await
            .unwrap();
        assert_eq!(score, 20);
        assert_eq!(*lookup.calls.lock().unwrap(), vec!["octocat".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_user_is_an_error() {
        let lookup = FakeLookup::default();
        let err = code_hosting_score(Some("https://github.com/ghost"), &lookup)
            .await
            .unwrap_err();
        assert!(matches!(err, ScoringError::Status(404)));
    }
}
