use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Happy,
    Neutral,
    Sad,
}

impl FeedbackKind {
    pub const ALL: [FeedbackKind; 3] = [FeedbackKind::Happy, FeedbackKind::Neutral, FeedbackKind::Sad];

    /// Wire value, as posted by the feedback form.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackKind::Happy => "happy",
            FeedbackKind::Neutral => "neutral",
            FeedbackKind::Sad => "sad",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedbackKind::Happy => "Happy",
            FeedbackKind::Neutral => "Neutral",
            FeedbackKind::Sad => "Sad",
        }
    }
}

impl fmt::Display for FeedbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the feedback service receives for every submitted form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub name: String,
    pub advice: String,
    pub feedback: FeedbackKind,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackCounts {
    pub happy: u64,
    pub neutral: u64,
    pub sad: u64,
}

impl FeedbackCounts {
    pub fn tally(kinds: impl IntoIterator<Item = FeedbackKind>) -> Self {
        let mut counts = Self::default();
        for kind in kinds {
            counts.record(kind);
        }
        counts
    }

    pub fn record(&mut self, kind: FeedbackKind) {
        match kind {
            FeedbackKind::Happy => self.happy += 1,
            FeedbackKind::Neutral => self.neutral += 1,
            FeedbackKind::Sad => self.sad += 1,
        }
    }

    pub fn get(&self, kind: FeedbackKind) -> u64 {
        match kind {
            FeedbackKind::Happy => self.happy,
            FeedbackKind::Neutral => self.neutral,
            FeedbackKind::Sad => self.sad,
        }
    }

    pub fn total(&self) -> u64 {
        self.happy + self.neutral + self.sad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_counts_each_kind() {
        let counts = FeedbackCounts::tally([
            FeedbackKind::Happy,
            FeedbackKind::Sad,
            FeedbackKind::Happy,
        ]);
        assert_eq!(counts.happy, 2);
        assert_eq!(counts.neutral, 0);
        assert_eq!(counts.sad, 1);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn display_matches_wire_name() {
        for kind in FeedbackKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
        }
    }
}
