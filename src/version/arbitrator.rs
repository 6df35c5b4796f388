//! Selection of the authoritative newest version among several candidates

use std::cmp::Ordering;

use tracing::debug;

use crate::version::error::CompareError;
use crate::version::schema::{ClassifierSpec, Priority};
use crate::version::types::Version;

/// A newer version and where to get it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Update {
    pub value: String,
    pub url: String,
}

impl Update {
    pub fn new(value: &str, url: &str) -> Self {
        Self {
            value: value.to_string(),
            url: url.to_string(),
        }
    }

    /// Substitutes `{version}` and `{url}` in a message template
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{version}", &self.value)
            .replace("{url}", &self.url)
    }
}

/// A version fetched from one upstream
#[derive(Debug, Clone)]
pub struct FetchedVersion {
    pub version: Version,
    /// Release URL built by the upstream for this version
    pub url: String,
    pub upstream_priority: Priority,
}

/// Picks one raw version out of several channel-specific ones.
///
/// The candidate whose spec has the strictly highest priority wins; ties keep the
/// earliest candidate. Returns `None` for an empty list.
pub fn prioritize_channel_versions(candidates: &[(String, ClassifierSpec)]) -> Option<&str> {
    let (first, rest) = candidates.split_first()?;

    let chosen = rest.iter().fold(first, |chosen, candidate| {
        if candidate.1.priority > chosen.1.priority {
            candidate
        } else {
            chosen
        }
    });

    Some(chosen.0.as_str())
}

/// Selects the best update across upstreams.
///
/// Candidates that are ignored or not strictly newer than `current` are discarded.
/// Among the rest the greatest version wins; equal versions are decided by upstream
/// priority, then by order. Comparison errors are returned, not skipped.
pub fn select_best_update(
    current: &Version,
    fetched: &[FetchedVersion],
) -> Result<Option<Update>, CompareError> {
    let mut best: Option<&FetchedVersion> = None;

    for candidate in fetched {
        if candidate.version.is_ignored() {
            debug!("Skipping ignored version {}", candidate.version);
            continue;
        }

        if !candidate.version.is_newer_than(current)? {
            debug!(
                "Skipping {}: not newer than {}",
                candidate.version, current
            );
            continue;
        }

        best = match best {
            None => Some(candidate),
            Some(chosen) => match candidate.version.try_compare(&chosen.version)? {
                Ordering::Greater => Some(candidate),
                Ordering::Equal if candidate.upstream_priority > chosen.upstream_priority => {
                    Some(candidate)
                }
                _ => Some(chosen),
            },
        };
    }

    Ok(best.map(|winner| Update::new(winner.version.raw(), &winner.url)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::version::parser::parse_version;
    use crate::version::schema::Schema;
    use rstest::rstest;

    fn schema() -> Schema {
        Schema::builder()
            .prefix("v")
            .classifier(ClassifierSpec::new("rc", "-", Priority::HIGHEST))
            .classifier(ClassifierSpec::new("snap", "-", Priority::LOW).ignored())
            .build()
            .unwrap()
    }

    fn fetched(raw: &str, url: &str, priority: i32) -> FetchedVersion {
        FetchedVersion {
            version: parse_version(raw, &schema()),
            url: url.to_string(),
            upstream_priority: Priority(priority),
        }
    }

    #[test]
    fn prioritize_channel_versions_prefers_higher_priority() {
        let candidates = vec![
            ("1.0-snap".to_string(), ClassifierSpec::new("snap", "-", Priority::LOW)),
            ("1.0-rel".to_string(), ClassifierSpec::new("rel", "-", Priority::HIGHEST)),
        ];

        assert_eq!(prioritize_channel_versions(&candidates), Some("1.0-rel"));
    }

    #[test]
    fn prioritize_channel_versions_keeps_first_on_tie() {
        let candidates = vec![
            ("1.0-a".to_string(), ClassifierSpec::new("a", "-", 3)),
            ("1.1-b".to_string(), ClassifierSpec::new("b", "-", 3)),
            ("0.9-c".to_string(), ClassifierSpec::new("c", "-", 1)),
        ];

        assert_eq!(prioritize_channel_versions(&candidates), Some("1.0-a"));
    }

    #[test]
    fn prioritize_channel_versions_returns_none_for_empty_list() {
        assert_eq!(prioritize_channel_versions(&[]), None);
    }

    #[test]
    fn select_best_update_discards_older_candidates() {
        let current = parse_version("2.0.0", &schema());
        let result = select_best_update(&current, &[fetched("1.9.0", "urlA", 5)]).unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn select_best_update_discards_equal_candidates() {
        let current = parse_version("v2.0.0", &schema());
        let result = select_best_update(&current, &[fetched("2.0.0", "urlA", 5)]).unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn select_best_update_breaks_ties_by_upstream_priority() {
        let current = parse_version("1.0.0", &schema());
        let result = select_best_update(
            &current,
            &[fetched("2.0.0", "urlA", 1), fetched("2.0.0", "urlB", 9)],
        )
        .unwrap();

        assert_eq!(result, Some(Update::new("2.0.0", "urlB")));
    }

    #[rstest]
    #[case(vec![("2.0.0", "urlA", 1), ("2.0.0", "urlB", 1)], "urlA")] // stable on full tie
    #[case(vec![("2.0.0", "urlA", 9), ("2.1.0", "urlB", 1)], "urlB")] // version beats priority
    #[case(vec![("2.0.0-rc.1", "urlA", 9), ("2.0.0", "urlB", 0)], "urlB")]
    #[case(vec![("0.9.0", "urlA", 9), ("1.5.0", "urlB", 0)], "urlB")]
    fn select_best_update_picks_expected_upstream(
        #[case] candidates: Vec<(&str, &str, i32)>,
        #[case] expected_url: &str,
    ) {
        let current = parse_version("1.0.0", &schema());
        let candidates: Vec<_> = candidates
            .into_iter()
            .map(|(raw, url, priority)| fetched(raw, url, priority))
            .collect();

        let result = select_best_update(&current, &candidates).unwrap().unwrap();
        assert_eq!(result.url, expected_url);
    }

    #[test]
    fn select_best_update_skips_ignored_candidates() {
        let current = parse_version("1.0.0", &schema());
        let result =
            select_best_update(&current, &[fetched("3.0.0-snap.4", "urlA", 9)]).unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn select_best_update_surfaces_size_mismatch() {
        let current = parse_version("1.0.0", &schema());
        let result = select_best_update(&current, &[fetched("2.0", "urlA", 1)]);

        assert_eq!(
            result,
            Err(CompareError::VersionSizeMismatch { left: 2, right: 3 })
        );
    }

    #[test]
    fn select_best_update_returns_none_without_candidates() {
        let current = parse_version("1.0.0", &schema());
        assert_eq!(select_best_update(&current, &[]).unwrap(), None);
    }

    #[test]
    fn update_render_substitutes_placeholders() {
        let update = Update::new("v1.3.0", "https://example.com/v1.3.0");

        assert_eq!(
            update.render("Version {version} is at {url}"),
            "Version v1.3.0 is at https://example.com/v1.3.0"
        );
    }
}
