//! Run comparison against a previously saved split list

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};

use super::SplitList;

/// Whether a split beat the baseline at the same index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    Faster,
    Slower,
}

impl Pace {
    /// Annotation text shown after the split time
    pub fn label(&self) -> &'static str {
        match self {
            Pace::Faster => "faster",
            Pace::Slower => "slower",
        }
    }
}

/// How to annotate splits past the end of the baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Mark them slower
    #[default]
    Slower,
    /// Leave them unannotated
    None,
}

impl FromStr for UnmatchedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "slower" => Ok(Self::Slower),
            "none" => Ok(Self::None),
            other => Err(format!("unknown unmatched policy '{}' (expected slower or none)", other)),
        }
    }
}

impl fmt::Display for UnmatchedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchedPolicy::Slower => write!(f, "slower"),
            UnmatchedPolicy::None => write!(f, "none"),
        }
    }
}

/// Split list loaded from disk for comparison. Never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBaseline {
    splits: SplitList,
    saved_at: Option<DateTime<Utc>>,
}

impl ComparisonBaseline {
    pub fn new(splits: SplitList, saved_at: Option<DateTime<Utc>>) -> Self {
        Self { splits, saved_at }
    }

    /// Splits loaded from the baseline file
    pub fn splits(&self) -> &SplitList {
        &self.splits
    }

    /// When the baseline file was written, if its stamp was valid
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        self.saved_at
    }

    /// Whole-list equality with the current run
    pub fn matches(&self, current: &SplitList) -> bool {
        self.splits == *current
    }

    /// Annotate every current split against the baseline at the same index
    pub fn annotate(&self, current: &SplitList, policy: UnmatchedPolicy) -> Vec<Option<Pace>> {
        current
            .iter()
            .enumerate()
            .map(|(i, split)| match self.splits.get(i) {
                Some(reference) if split < reference => Some(Pace::Faster),
                Some(_) => Some(Pace::Slower),
                None => match policy {
                    UnmatchedPolicy::Slower => Some(Pace::Slower),
                    UnmatchedPolicy::None => None,
                },
            })
            .collect()
    }
}
