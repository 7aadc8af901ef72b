//! Commit categorization into changelog sections

use chrono::NaiveDate;
use tracing::{debug, instrument};

use launchpad_core::config::{ChangelogConfig, SectionToggles};

use crate::types::{Changelog, ChangelogSection, CommitRecord, SectionKind};

/// Groups parsed commits into ordered changelog sections
#[derive(Debug, Clone)]
pub struct ChangelogAggregator {
    sections: SectionToggles,
    dual_list_breaking: bool,
}

impl ChangelogAggregator {
    /// Create an aggregator with the given section toggles
    pub fn new(sections: SectionToggles) -> Self {
        Self {
            sections,
            dual_list_breaking: true,
        }
    }

    /// Create an aggregator from changelog configuration
    pub fn from_config(config: &ChangelogConfig) -> Self {
        Self::new(config.sections).with_dual_listing(config.dual_list_breaking)
    }

    /// Set whether breaking commits are also listed under their own type
    pub fn with_dual_listing(mut self, dual: bool) -> Self {
        self.dual_list_breaking = dual;
        self
    }

    fn enabled(&self, kind: SectionKind) -> bool {
        match kind {
            SectionKind::Breaking => self.sections.breaking,
            SectionKind::Feat => self.sections.feat,
            SectionKind::Fix => self.sections.fix,
            SectionKind::Docs => self.sections.docs,
            SectionKind::Maintenance => self.sections.maintenance,
            SectionKind::Other => true,
        }
    }

    /// Build a changelog from commits, keeping their input order
    ///
    /// An empty commit list yields a changelog with no sections.
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn aggregate(&self, version: &str, date: NaiveDate, commits: &[CommitRecord]) -> Changelog {
        let mut sections: Vec<ChangelogSection> = SectionKind::all()
            .iter()
            .map(|kind| ChangelogSection::new(*kind))
            .collect();

        let breaking_listed = self.enabled(SectionKind::Breaking);

        for commit in commits {
            if commit.breaking && breaking_listed {
                sections[SectionKind::Breaking.priority() as usize].add_commit(commit.clone());
                if !self.dual_list_breaking {
                    continue;
                }
            }

            let kind = SectionKind::for_commit_type(&commit.commit_type);
            sections[kind.priority() as usize].add_commit(commit.clone());
        }

        let sections: Vec<ChangelogSection> = sections
            .into_iter()
            .filter(|s| self.enabled(s.kind) && !s.is_empty())
            .collect();

        debug!(
            version,
            sections = ?sections.iter().map(|s| s.kind).collect::<Vec<_>>(),
            "changelog sections built"
        );

        Changelog {
            version: version.to_string(),
            date,
            sections,
        }
    }
}

impl Default for ChangelogAggregator {
    fn default() -> Self {
        Self::new(SectionToggles::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_subject;
    use chrono::Utc;

    fn record(hash: &str, subject: &str) -> CommitRecord {
        let parsed = parse_subject(subject);
        CommitRecord {
            hash: hash.to_string(),
            subject: subject.to_string(),
            author: "Test".to_string(),
            date: Utc::now(),
            commit_type: parsed.commit_type,
            scope: parsed.scope,
            description: parsed.description,
            breaking: parsed.breaking,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 16).unwrap()
    }

    fn descriptions(section: &ChangelogSection) -> Vec<&str> {
        section.commits.iter().map(|c| c.description.as_str()).collect()
    }

    #[test]
    fn test_breaking_commit_is_dual_listed() {
        let commits = vec![
            record("a000000001", "feat(auth)!: drop v1 login"),
            record("a000000002", "fix: crash on launch"),
            record("a000000003", "Update README"),
        ];

        let changelog = ChangelogAggregator::default().aggregate("2.0.0", date(), &commits);
        let kinds: Vec<_> = changelog.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SectionKind::Breaking,
                SectionKind::Feat,
                SectionKind::Fix,
                SectionKind::Other
            ]
        );
        assert_eq!(descriptions(&changelog.sections[0]), vec!["drop v1 login"]);
        assert_eq!(descriptions(&changelog.sections[1]), vec!["drop v1 login"]);
    }

    #[test]
    fn test_breaking_fix_with_default_sections() {
        let commits = vec![
            record("b1", "fix!: reject legacy tokens"),
            record("b2", "feat: add export"),
            record("b3", "fix: trim input"),
            record("b4", "chore: tidy scripts"),
        ];

        let changelog = ChangelogAggregator::default().aggregate("2.0.0", date(), &commits);
        let kinds: Vec<_> = changelog.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Breaking, SectionKind::Feat, SectionKind::Fix]
        );
        assert_eq!(descriptions(&changelog.sections[0]), vec!["reject legacy tokens"]);
        assert_eq!(descriptions(&changelog.sections[1]), vec!["add export"]);
        assert_eq!(
            descriptions(&changelog.sections[2]),
            vec!["reject legacy tokens", "trim input"]
        );
    }

    #[test]
    fn test_without_dual_listing() {
        let commits = vec![record("a1", "feat!: drop v1"), record("a2", "feat: add v2")];
        let changelog = ChangelogAggregator::default()
            .with_dual_listing(false)
            .aggregate("2.0.0", date(), &commits);

        assert_eq!(descriptions(&changelog.sections[0]), vec!["drop v1"]);
        assert_eq!(descriptions(&changelog.sections[1]), vec!["add v2"]);
    }

    #[test]
    fn test_disabled_breaking_section_keeps_commit_under_type() {
        let toggles = SectionToggles {
            breaking: false,
            ..SectionToggles::default()
        };
        let commits = vec![record("a1", "fix!: change error codes")];
        let changelog = ChangelogAggregator::new(toggles)
            .with_dual_listing(false)
            .aggregate("2.0.0", date(), &commits);

        assert_eq!(changelog.sections.len(), 1);
        assert_eq!(changelog.sections[0].kind, SectionKind::Fix);
    }

    #[test]
    fn test_disabled_sections_are_omitted() {
        let commits = vec![
            record("a1", "docs: explain flags"),
            record("a2", "chore: bump deps"),
            record("a3", "ci: cache builds"),
            record("a4", "feat: add flag"),
        ];

        let changelog = ChangelogAggregator::default().aggregate("1.1.0", date(), &commits);
        assert_eq!(changelog.sections.len(), 1);
        assert_eq!(changelog.sections[0].kind, SectionKind::Feat);

        let changelog = ChangelogAggregator::new(SectionToggles::all())
            .aggregate("1.1.0", date(), &commits);
        let kinds: Vec<_> = changelog.sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Feat, SectionKind::Docs, SectionKind::Maintenance]
        );
        assert_eq!(
            descriptions(&changelog.sections[2]),
            vec!["bump deps", "cache builds"]
        );
    }

    #[test]
    fn test_other_is_always_emitted() {
        let toggles = SectionToggles {
            breaking: false,
            feat: false,
            fix: false,
            docs: false,
            maintenance: false,
        };
        let commits = vec![record("a1", "refactor: split module")];
        let changelog = ChangelogAggregator::new(toggles).aggregate("1.0.1", date(), &commits);

        assert_eq!(changelog.sections.len(), 1);
        assert_eq!(changelog.sections[0].kind, SectionKind::Other);
    }

    #[test]
    fn test_input_order_is_kept() {
        let commits = vec![
            record("a1", "fix: third"),
            record("a2", "fix: second"),
            record("a3", "fix: first"),
        ];
        let changelog = ChangelogAggregator::default().aggregate("1.0.1", date(), &commits);
        assert_eq!(
            descriptions(&changelog.sections[0]),
            vec!["third", "second", "first"]
        );
    }

    #[test]
    fn test_empty_range() {
        let changelog = ChangelogAggregator::default().aggregate("1.0.0", date(), &[]);
        assert!(changelog.sections.is_empty());
        assert!(changelog.is_empty());
    }
}
