// Professional-network and public-presence heuristics. Both are coarse placeholders:
// they look only at which links exist, never at their content.

/// Host marker a professional-network URL must contain.
pub const NETWORK_HOST_MARKER: &str = "linkedin.com";
/// Flat score for any recognised professional-network profile.
pub const NETWORK_PROFILE_SCORE: u8 = 80;

const PRESENCE_BASE: u8 = 50;
const PRESENCE_PER_LINK: u8 = 15;

/// 80 when the URL names a professional-network profile, else 0.
pub fn professional_network_score(url: Option<&str>) -> u8 {
    match url {
        Some(u) if u.to_ascii_lowercase().contains(NETWORK_HOST_MARKER) => NETWORK_PROFILE_SCORE,
        _ => 0,
    }
}

/// 50 for a named candidate plus 15 per profile link, capped at 100. Unnamed → 0.
pub fn public_presence_score(name: &str, github_url: Option<&str>, linkedin_url: Option<&str>) -> u8 {
    if name.trim().is_empty() {
        return 0;
    }
    let links = [github_url, linkedin_url]
        .into_iter()
        .filter(|u| u.is_some_and(|u| !u.trim().is_empty()))
        .count() as u8;
    PRESENCE_BASE.saturating_add(links * PRESENCE_PER_LINK).min(100)
}
