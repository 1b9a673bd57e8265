//! Branch-name-safe slugs derived from issue summaries.
use regex::Regex;
use std::sync::LazyLock;

/// Maximum slug length, applied before trimming dashes from the ends.
pub const MAX_SLUG_LENGTH: usize = 50;

/// Matches any character that is not allowed in a slug
static DISALLOWED_CHAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]").unwrap());

/// Matches runs of dashes
static DASH_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-+").unwrap());

/// Convert free text into a lower-case, dash separated slug of at most
/// [`MAX_SLUG_LENGTH`] characters that never starts or ends with a dash.
pub fn slug(text: &str) -> String {
    let lowered = text.to_lowercase();
    let dashed = DISALLOWED_CHAR_REGEX.replace_all(&lowered, "-");
    let collapsed = DASH_RUN_REGEX.replace_all(&dashed, "-");
    // every remaining character is ascii so chars and bytes line up
    let truncated: String = collapsed.chars().take(MAX_SLUG_LENGTH).collect();
    let trimmed = truncated.strip_prefix('-').unwrap_or(&truncated);
    let trimmed = trimmed.strip_suffix('-').unwrap_or(trimmed);
    trimmed.to_string()
}
