//! Semantic validation of navigation configuration.
//!
//! Structural defects (missing or mistyped fields) are rejected by the
//! decoder. This module checks the rules a well-formed value can still break:
//!
//! | Rule | Severity |
//! |------|----------|
//! | base path is empty or lacks a leading `/` | error |
//! | two groups share a heading | error |
//! | two items in one group share a link | error |
//! | link is empty or lacks a leading `/` | error |
//! | base path lacks a trailing `/` | warning |
//! | title is empty | warning |
//! | sidebar has no groups | warning |
//! | group has no items | warning |
//!
//! Offending entries are reported, never dropped or deduplicated.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;

use crate::sidebar::NavigationConfig;

/// How serious an [`Issue`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Usable, but probably not what the author meant.
    Warning,
    /// Makes the configuration invalid.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Rule broken by an [`Issue`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rule {
    /// `basePath` is the empty string.
    EmptyBasePath,
    /// `basePath` does not start with `/`.
    BasePathNotAbsolute,
    /// `basePath` does not end with `/`.
    BasePathWithoutTrailingSlash,
    /// `title` is empty or whitespace.
    EmptyTitle,
    /// `sidebar` has no groups.
    EmptySidebar,
    /// Group has no items.
    EmptyGroup,
    /// Heading already used by the group at `first`.
    DuplicateGroupText { first: usize },
    /// Link already used by the item at `first` in the same group.
    DuplicateLink { first: usize },
    /// Item link is the empty string.
    EmptyLink,
    /// Item link does not start with `/`.
    LinkNotRelative,
}

impl Rule {
    /// Severity this rule is reported with.
    #[must_use]
    pub fn severity(&self) -> Severity {
        match self {
            Self::BasePathWithoutTrailingSlash
            | Self::EmptyTitle
            | Self::EmptySidebar
            | Self::EmptyGroup => Severity::Warning,
            Self::EmptyBasePath
            | Self::BasePathNotAbsolute
            | Self::DuplicateGroupText { .. }
            | Self::DuplicateLink { .. }
            | Self::EmptyLink
            | Self::LinkNotRelative => Severity::Error,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBasePath => f.write_str("base path cannot be empty"),
            Self::BasePathNotAbsolute => f.write_str("base path must start with '/'"),
            Self::BasePathWithoutTrailingSlash => f.write_str("base path should end with '/'"),
            Self::EmptyTitle => f.write_str("title is empty"),
            Self::EmptySidebar => f.write_str("sidebar has no groups"),
            Self::EmptyGroup => f.write_str("group has no items"),
            Self::DuplicateGroupText { first } => {
                write!(f, "duplicate group text (first used by sidebar[{first}])")
            }
            Self::DuplicateLink { first } => {
                write!(f, "duplicate link (first used by items[{first}])")
            }
            Self::EmptyLink => f.write_str("link cannot be empty"),
            Self::LinkNotRelative => f.write_str("link must be site-relative and start with '/'"),
        }
    }
}

/// Where in the configuration an [`Issue`] was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// The `title` field.
    Title,
    /// The `basePath` field.
    BasePath,
    /// The sidebar as a whole.
    Sidebar,
    /// A group, by position and heading.
    Group { index: usize, text: String },
    /// An item, by position and link, inside its group.
    Item {
        group_index: usize,
        group_text: String,
        index: usize,
        link: String,
    },
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => f.write_str("title"),
            Self::BasePath => f.write_str("basePath"),
            Self::Sidebar => f.write_str("sidebar"),
            Self::Group { index, text } => write!(f, "sidebar[{index}] {text:?}"),
            Self::Item {
                group_index,
                group_text,
                index,
                link,
            } => write!(
                f,
                "sidebar[{group_index}] {group_text:?} items[{index}] link {link:?}"
            ),
        }
    }
}

/// Single validation finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Issue {
    pub severity: Severity,
    pub location: Location,
    pub rule: Rule,
}

impl Issue {
    fn new(location: Location, rule: Rule) -> Self {
        Self {
            severity: rule.severity(),
            location,
            rule,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.rule)
    }
}

/// All issues found in one configuration, in detection order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<Issue>,
}

impl ValidationReport {
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|issue| issue.severity == Severity::Warning)
    }

    /// Turn the report into a pass/fail result.
    ///
    /// Errors always fail. With `strict`, warnings fail too.
    ///
    /// # Errors
    ///
    /// Returns the report itself when it fails.
    pub fn into_result(self, strict: bool) -> Result<(), Self> {
        let failed = if strict {
            !self.is_empty()
        } else {
            self.has_errors()
        };
        if failed { Err(self) } else { Ok(()) }
    }

    fn push(&mut self, location: Location, rule: Rule) {
        self.issues.push(Issue::new(location, rule));
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, issue) in self.issues.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl NavigationConfig {
    /// Check the configuration against every rule and collect the findings.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.title.trim().is_empty() {
            report.push(Location::Title, Rule::EmptyTitle);
        }
        self.validate_base_path(&mut report);
        self.validate_sidebar(&mut report);

        report
    }

    fn validate_base_path(&self, report: &mut ValidationReport) {
        if self.base_path.is_empty() {
            report.push(Location::BasePath, Rule::EmptyBasePath);
            return;
        }
        if !self.base_path.starts_with('/') {
            report.push(Location::BasePath, Rule::BasePathNotAbsolute);
        }
        if !self.base_path.ends_with('/') {
            report.push(Location::BasePath, Rule::BasePathWithoutTrailingSlash);
        }
    }

    fn validate_sidebar(&self, report: &mut ValidationReport) {
        if self.sidebar.is_empty() {
            report.push(Location::Sidebar, Rule::EmptySidebar);
            return;
        }

        let mut headings: HashMap<&str, usize> = HashMap::new();
        for (group_index, group) in self.sidebar.iter().enumerate() {
            let group_location = || Location::Group {
                index: group_index,
                text: group.text.clone(),
            };

            match headings.entry(group.text.as_str()) {
                Entry::Occupied(first) => {
                    report.push(
                        group_location(),
                        Rule::DuplicateGroupText { first: *first.get() },
                    );
                }
                Entry::Vacant(slot) => {
                    slot.insert(group_index);
                }
            }

            if group.items.is_empty() {
                report.push(group_location(), Rule::EmptyGroup);
                continue;
            }

            let mut links: HashMap<&str, usize> = HashMap::new();
            for (index, item) in group.items.iter().enumerate() {
                let item_location = || Location::Item {
                    group_index,
                    group_text: group.text.clone(),
                    index,
                    link: item.link.clone(),
                };

                if item.link.is_empty() {
                    report.push(item_location(), Rule::EmptyLink);
                } else if !item.link.starts_with('/') {
                    report.push(item_location(), Rule::LinkNotRelative);
                }

                match links.entry(item.link.as_str()) {
                    Entry::Occupied(first) => {
                        report.push(item_location(), Rule::DuplicateLink { first: *first.get() });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(index);
                    }
                }
            }
        }
    }
}
