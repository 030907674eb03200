//! Sign-in inactivity classification.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Cleanup recommendation derived from the latest sign-in.
///
/// Thresholds are strict: exactly 30 days is still `Ok`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InactivityStatus {
    Ok,
    Monitor,
    ReviewRecommended,
    CleanupCandidate,
    HighPriorityCleanup,
    /// Sign-in activity exists but holds no timestamps.
    Never,
    /// Graph returned no sign-in activity for the user.
    Unknown,
}

impl InactivityStatus {
    pub fn label(&self) -> &'static str {
        match self {
            InactivityStatus::Ok => "OK",
            InactivityStatus::Monitor => "Monitor",
            InactivityStatus::ReviewRecommended => "Review recommended",
            InactivityStatus::CleanupCandidate => "Cleanup candidate",
            InactivityStatus::HighPriorityCleanup => "High priority cleanup",
            InactivityStatus::Never => "Never logged in",
            InactivityStatus::Unknown => "Unknown",
        }
    }

    /// Whether the user counts toward the inactive total.
    ///
    /// `Unknown` is a data gap, not evidence of inactivity.
    pub fn is_inactive(&self) -> bool {
        !matches!(self, InactivityStatus::Ok | InactivityStatus::Unknown)
    }

    /// Classify a whole-day gap.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d > 180 => InactivityStatus::HighPriorityCleanup,
            d if d > 90 => InactivityStatus::CleanupCandidate,
            d if d > 60 => InactivityStatus::ReviewRecommended,
            d if d > 30 => InactivityStatus::Monitor,
            _ => InactivityStatus::Ok,
        }
    }
}

impl fmt::Display for InactivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Days since the latest sign-in, or why there is no number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DaysSinceSignIn {
    Days(i64),
    Never,
    Unknown,
}

impl DaysSinceSignIn {
    pub fn days(&self) -> Option<i64> {
        match self {
            DaysSinceSignIn::Days(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for DaysSinceSignIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysSinceSignIn::Days(d) => write!(f, "{d}"),
            DaysSinceSignIn::Never => f.write_str("Never"),
            DaysSinceSignIn::Unknown => f.write_str("Unknown"),
        }
    }
}

/// Result of classifying one user's sign-in activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inactivity {
    pub last_sign_in: Option<DateTime<Utc>>,
    pub days: DaysSinceSignIn,
    pub status: InactivityStatus,
}

impl Inactivity {
    /// Classification for a user whose sign-in activity is unavailable.
    pub fn unknown() -> Self {
        Self {
            last_sign_in: None,
            days: DaysSinceSignIn::Unknown,
            status: InactivityStatus::Unknown,
        }
    }
}

/// Classify the later of two sign-in timestamps against `as_of`.
///
/// Both absent yields `Never`. Sign-ins after `as_of` count as zero days.
pub fn classify_inactivity(
    last_interactive: Option<DateTime<Utc>>,
    last_non_interactive: Option<DateTime<Utc>>,
    as_of: DateTime<Utc>,
) -> Inactivity {
    let Some(latest) = last_interactive.max(last_non_interactive) else {
        return Inactivity {
            last_sign_in: None,
            days: DaysSinceSignIn::Never,
            status: InactivityStatus::Never,
        };
    };

    let days = (as_of - latest).num_days().max(0);
    Inactivity {
        last_sign_in: Some(latest),
        days: DaysSinceSignIn::Days(days),
        status: InactivityStatus::from_days(days),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_cleanup_candidate_window() {
        let result = classify_inactivity(Some(at(2024, 1, 1)), None, at(2024, 6, 1));
        assert_eq!(result.status, InactivityStatus::CleanupCandidate);
        assert_eq!(result.status.label(), "Cleanup candidate");
        assert_eq!(result.days, DaysSinceSignIn::Days(152));
    }

    #[test]
    fn test_both_absent_is_never_not_ok() {
        let result = classify_inactivity(None, None, at(2024, 6, 1));
        assert_eq!(result.status.label(), "Never logged in");
        assert_eq!(result.days.to_string(), "Never");
        assert!(result.status.is_inactive());
    }

    #[test]
    fn test_later_timestamp_wins() {
        let result =
            classify_inactivity(Some(at(2023, 1, 1)), Some(at(2024, 5, 25)), at(2024, 6, 1));
        assert_eq!(result.days, DaysSinceSignIn::Days(7));
        assert_eq!(result.status, InactivityStatus::Ok);
        assert_eq!(result.last_sign_in, Some(at(2024, 5, 25)));
    }

    #[test]
    fn test_thresholds_are_strict() {
        assert_eq!(InactivityStatus::from_days(30), InactivityStatus::Ok);
        assert_eq!(InactivityStatus::from_days(31), InactivityStatus::Monitor);
        assert_eq!(InactivityStatus::from_days(60), InactivityStatus::Monitor);
        assert_eq!(
            InactivityStatus::from_days(61),
            InactivityStatus::ReviewRecommended
        );
        assert_eq!(
            InactivityStatus::from_days(90),
            InactivityStatus::ReviewRecommended
        );
        assert_eq!(
            InactivityStatus::from_days(91),
            InactivityStatus::CleanupCandidate
        );
        assert_eq!(
            InactivityStatus::from_days(180),
            InactivityStatus::CleanupCandidate
        );
        assert_eq!(
            InactivityStatus::from_days(181),
            InactivityStatus::HighPriorityCleanup
        );
    }

    #[test]
    fn test_future_sign_in_clamps_to_zero() {
        let result = classify_inactivity(Some(at(2024, 7, 1)), None, at(2024, 6, 1));
        assert_eq!(result.days, DaysSinceSignIn::Days(0));
    }

    #[test]
    fn test_unknown_is_not_counted_inactive() {
        let unknown = Inactivity::unknown();
        assert_eq!(unknown.status.label(), "Unknown");
        assert!(!unknown.status.is_inactive());
    }
}
