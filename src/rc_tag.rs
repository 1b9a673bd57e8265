//! Release candidate tags of the form `<version>.<feature>.rc<N>`.

/// Tag prefix shared by every candidate of a feature at a version.
pub fn rc_tag_prefix(feature: &str, version: &str) -> String {
    format!("{version}.{feature}.rc")
}

/// Highest candidate number tagged for the feature at the given version, or
/// `0` when none exists. Suffixes that are not plain numbers are ignored.
pub fn latest_rc_number<S: AsRef<str>>(
    tags: &[S],
    feature: &str,
    version: &str,
) -> u64 {
    let prefix = rc_tag_prefix(feature, version);

    tags.iter()
        .filter_map(|tag| tag.as_ref().strip_prefix(prefix.as_str()))
        .filter_map(|number| number.parse::<u64>().ok())
        .max()
        .unwrap_or(0)
}

/// Next candidate tag for the feature at the given version. The number
/// stops growing at `u64::MAX`.
pub fn next_rc_tag<S: AsRef<str>>(
    tags: &[S],
    feature: &str,
    version: &str,
) -> String {
    format!(
        "{}{}",
        rc_tag_prefix(feature, version),
        latest_rc_number(tags, feature, version).saturating_add(1)
    )
}
