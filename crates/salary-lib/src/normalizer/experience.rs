//! Experience tier derivation

use crate::models::ExperienceLevel;

/// Last year (inclusive) of each tier below Executive
pub const ENTRY_MAX_YEARS: u32 = 2;
pub const MID_MAX_YEARS: u32 = 5;
pub const SENIOR_MAX_YEARS: u32 = 10;

/// Map years of experience onto its tier.
///
/// Boundaries are closed and non-overlapping: [0,2], [3,5], [6,10], [11,∞).
pub fn experience_level_for_years(years: u32) -> ExperienceLevel {
    match years {
        0..=ENTRY_MAX_YEARS => ExperienceLevel::Entry,
        3..=MID_MAX_YEARS => ExperienceLevel::Mid,
        6..=SENIOR_MAX_YEARS => ExperienceLevel::Senior,
        _ => ExperienceLevel::Executive,
    }
}

/// Work arrangement implied by the remote ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteCategory {
    OnSite,
    Hybrid,
    Remote,
}

impl RemoteCategory {
    pub fn from_ratio(ratio: u8) -> Self {
        match ratio {
            0 => RemoteCategory::OnSite,
            1..=99 => RemoteCategory::Hybrid,
            _ => RemoteCategory::Remote,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteCategory::OnSite => "On-site",
            RemoteCategory::Hybrid => "Hybrid",
            RemoteCategory::Remote => "Remote",
        }
    }
}
