//! Commit area tags derived from the set of changed file paths.
use serde::{Deserialize, Serialize};

/// Label used when files changed but none matched a rule.
pub const FALLBACK_LABEL: &str = "CONFIG";

/// Maps a repository path prefix to the area label it contributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTagRule {
    pub label: String,
    pub prefix: String,
}

impl CommitTagRule {
    pub fn new(label: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            prefix: prefix.into(),
        }
    }
}

/// Rules in the order their labels appear in a tag.
pub fn default_rules() -> Vec<CommitTagRule> {
    vec![
        CommitTagRule::new("SHARED", "src/portals/_shared"),
        CommitTagRule::new("HQ", "src/portals/hq"),
        CommitTagRule::new("LOG", "src/portals/log"),
        CommitTagRule::new("SUP", "src/portals/sup"),
        CommitTagRule::new("CDC", "src/portals/cdc"),
        CommitTagRule::new("ANA", "src/portals/ana"),
        CommitTagRule::new("LEGACY", "src/js/"),
    ]
}

/// Classify changed paths with the default rules.
pub fn classify<S: AsRef<str>>(paths: &[S]) -> String {
    classify_with_rules(paths, &default_rules())
}

/// Build a `[LABEL/LABEL]` tag for the changed paths. Every rule with at
/// least one matching path contributes its label, in rule order. An empty
/// path list yields an empty string.
pub fn classify_with_rules<S: AsRef<str>>(
    paths: &[S],
    rules: &[CommitTagRule],
) -> String {
    if paths.is_empty() {
        return String::new();
    }

    let mut labels: Vec<&str> = rules
        .iter()
        .filter(|rule| {
            paths
                .iter()
                .any(|path| path.as_ref().starts_with(rule.prefix.as_str()))
        })
        .map(|rule| rule.label.as_str())
        .collect();

    if labels.is_empty() {
        labels.push(FALLBACK_LABEL);
    }

    format!("[{}]", labels.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_single_areas() {
        assert_eq!(classify(&["src/portals/hq/aoeu/aoeu"]), "[HQ]");
        assert_eq!(classify(&["src/portals/sup/aoeu/aoeu"]), "[SUP]");
        assert_eq!(classify(&["src/portals/cdc/aoeu/aoeu"]), "[CDC]");
        assert_eq!(classify(&["src/portals/log/aoeu/aoeu"]), "[LOG]");
        assert_eq!(classify(&["src/portals/ana/aoeu/aoeu"]), "[ANA]");
        assert_eq!(classify(&["src/portals/_shared/aoeu/aoeu"]), "[SHARED]");
        assert_eq!(classify(&["src/js/business/entity-info.js"]), "[LEGACY]");
    }

    #[test]
    fn tags_multiple_areas_in_priority_order() {
        assert_eq!(
            classify(&["src/portals/ana/aoeu/aoeu", "src/portals/hq/aoeu/aoeu"]),
            "[HQ/ANA]"
        );
        assert_eq!(
            classify(&["src/portals/log/aoeu/aoeu", "src/portals/cdc/aoeu/aoeu"]),
            "[LOG/CDC]"
        );
        assert_eq!(
            classify(&[
                "src/portals/sup/aoeu/aoeu",
                "src/portals/hq/aoeu/aoeu",
                "src/portals/cdc/aoeu/aoeu",
            ]),
            "[HQ/SUP/CDC]"
        );
        assert_eq!(
            classify(&[
                "src/portals/_shared/aoeu/aoeu",
                "src/portals/hq/aoeu/aoeu",
            ]),
            "[SHARED/HQ]"
        );
        assert_eq!(
            classify(&["src/portals/hq/a", "src/portals/cdc/b"]),
            "[HQ/CDC]"
        );
    }

    #[test]
    fn falls_back_to_config() {
        assert_eq!(
            classify(&["src/portals/aoeu", "src/portals/index.js"]),
            "[CONFIG]"
        );
        assert_eq!(classify(&["package.json"]), "[CONFIG]");
    }

    #[test]
    fn empty_paths_yield_empty_tag() {
        let empty: [&str; 0] = [];
        assert_eq!(classify(&empty), "");
    }

    #[test]
    fn ignores_order_and_duplicates() {
        let paths = [
            "src/portals/cdc/a",
            "src/js/legacy.js",
            "src/portals/hq/b",
            "src/portals/hq/b",
        ];
        let expected = "[HQ/CDC/LEGACY]";
        assert_eq!(classify(&paths), expected);

        let mut reversed = paths.to_vec();
        reversed.reverse();
        assert_eq!(classify(&reversed), expected);
    }

    #[test]
    fn supports_custom_rules() {
        let mut rules = vec![CommitTagRule::new("TEST", "src/__tests__")];
        rules.extend(default_rules());

        assert_eq!(
            classify_with_rules(&["src/__tests__/aoeu/aeou.,/,p."], &rules),
            "[TEST]"
        );
        assert_eq!(
            classify_with_rules(
                &["src/__tests__/aoeu/aeou.,/,p.", "src/portals/cdc/aoeu"],
                &rules
            ),
            "[TEST/CDC]"
        );
    }
}
