//! Free-text normalization for categorical fields
//!
//! Maps the spellings people actually type ("usa", "sr", "startup") onto the
//! canonical enum values the prediction service accepts.

use crate::models::{CompanyLocation, CompanySize, ExperienceLevel};
use tracing::debug;

const EXPERIENCE_ALIASES: &[(&str, ExperienceLevel)] = &[
    ("entry level", ExperienceLevel::Entry),
    ("mid level", ExperienceLevel::Mid),
    ("senior level", ExperienceLevel::Senior),
    ("executive", ExperienceLevel::Executive),
    ("entry", ExperienceLevel::Entry),
    ("junior", ExperienceLevel::Entry),
    ("beginner", ExperienceLevel::Entry),
    ("entry-level", ExperienceLevel::Entry),
    ("0-2 years", ExperienceLevel::Entry),
    ("mid", ExperienceLevel::Mid),
    ("middle", ExperienceLevel::Mid),
    ("intermediate", ExperienceLevel::Mid),
    ("mid-level", ExperienceLevel::Mid),
    ("3-5 years", ExperienceLevel::Mid),
    ("senior", ExperienceLevel::Senior),
    ("sr", ExperienceLevel::Senior),
    ("experienced", ExperienceLevel::Senior),
    ("senior-level", ExperienceLevel::Senior),
    ("6-10 years", ExperienceLevel::Senior),
    ("exec", ExperienceLevel::Executive),
    ("lead", ExperienceLevel::Executive),
    ("director", ExperienceLevel::Executive),
    ("manager", ExperienceLevel::Executive),
    ("principal", ExperienceLevel::Executive),
    ("staff", ExperienceLevel::Executive),
    ("10+ years", ExperienceLevel::Executive),
];

const SIZE_ALIASES: &[(&str, CompanySize)] = &[
    ("small", CompanySize::Small),
    ("medium", CompanySize::Medium),
    ("large", CompanySize::Large),
    ("enterprise", CompanySize::Enterprise),
    ("startup", CompanySize::Small),
    ("small company", CompanySize::Small),
    ("1-50", CompanySize::Small),
    ("1-50 employees", CompanySize::Small),
    ("mid", CompanySize::Medium),
    ("mid-size", CompanySize::Medium),
    ("medium company", CompanySize::Medium),
    ("51-250", CompanySize::Medium),
    ("51-250 employees", CompanySize::Medium),
    ("big", CompanySize::Large),
    ("large company", CompanySize::Large),
    ("251-1000", CompanySize::Large),
    ("251-1000 employees", CompanySize::Large),
    ("huge", CompanySize::Enterprise),
    ("corporation", CompanySize::Enterprise),
    ("enterprise company", CompanySize::Enterprise),
    ("1000+", CompanySize::Enterprise),
    ("1000+ employees", CompanySize::Enterprise),
];

const LOCATION_ALIASES: &[(&str, CompanyLocation)] = &[
    ("united states", CompanyLocation::UnitedStates),
    ("canada", CompanyLocation::Canada),
    ("united kingdom", CompanyLocation::UnitedKingdom),
    ("germany", CompanyLocation::Germany),
    ("france", CompanyLocation::France),
    ("denmark", CompanyLocation::Denmark),
    ("sweden", CompanyLocation::Sweden),
    ("singapore", CompanyLocation::Singapore),
    ("israel", CompanyLocation::Israel),
    ("austria", CompanyLocation::Austria),
    ("india", CompanyLocation::India),
    ("china", CompanyLocation::China),
    ("other", CompanyLocation::Other),
    ("us", CompanyLocation::UnitedStates),
    ("usa", CompanyLocation::UnitedStates),
    ("america", CompanyLocation::UnitedStates),
    ("united states of america", CompanyLocation::UnitedStates),
    ("ca", CompanyLocation::Canada),
    ("uk", CompanyLocation::UnitedKingdom),
    ("britain", CompanyLocation::UnitedKingdom),
    ("great britain", CompanyLocation::UnitedKingdom),
    ("england", CompanyLocation::UnitedKingdom),
    ("de", CompanyLocation::Germany),
    ("deutschland", CompanyLocation::Germany),
    ("fr", CompanyLocation::France),
    ("dk", CompanyLocation::Denmark),
    ("se", CompanyLocation::Sweden),
    ("sg", CompanyLocation::Singapore),
    ("il", CompanyLocation::Israel),
    ("at", CompanyLocation::Austria),
    ("in", CompanyLocation::India),
    ("cn", CompanyLocation::China),
];

fn exact<T: Copy>(table: &[(&str, T)], needle: &str) -> Option<T> {
    table.iter().find(|(alias, _)| *alias == needle).map(|(_, v)| *v)
}

impl ExperienceLevel {
    /// Parse a free-text tier label. Exact aliases win, then substring matches
    /// in either direction. Unrecognized text yields `None`.
    pub fn normalize(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }

        let level = exact(EXPERIENCE_ALIASES, &needle).or_else(|| {
            EXPERIENCE_ALIASES
                .iter()
                .find(|(alias, _)| needle.contains(alias) || alias.contains(needle.as_str()))
                .map(|(_, level)| *level)
        });
        debug!(raw = %raw, normalized = ?level, "Normalized experience level");
        level
    }
}

impl CompanySize {
    /// Parse a free-text company size. Unrecognized text yields `Medium`.
    pub fn normalize(raw: &str) -> Self {
        let needle = raw.trim().to_lowercase();

        exact(SIZE_ALIASES, &needle)
            .or_else(|| {
                SIZE_ALIASES
                    .iter()
                    .find(|(alias, _)| needle.contains(alias))
                    .map(|(_, size)| *size)
            })
            .unwrap_or_else(|| {
                debug!(raw = %raw, "Unknown company size, defaulting to Medium");
                CompanySize::Medium
            })
    }
}

impl CompanyLocation {
    /// Parse a country name or code. Unrecognized text yields `Other`.
    pub fn normalize(raw: &str) -> Self {
        let needle = raw.trim().to_lowercase();
        exact(LOCATION_ALIASES, &needle).unwrap_or_else(|| {
            debug!(raw = %raw, "Unknown location, using Other");
            CompanyLocation::Other
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_aliases() {
        assert_eq!(CompanyLocation::normalize("USA"), CompanyLocation::UnitedStates);
        assert_eq!(CompanyLocation::normalize(" uk "), CompanyLocation::UnitedKingdom);
        assert_eq!(CompanyLocation::normalize("Deutschland"), CompanyLocation::Germany);
        assert_eq!(CompanyLocation::normalize("Denmark"), CompanyLocation::Denmark);
        assert_eq!(CompanyLocation::normalize("Atlantis"), CompanyLocation::Other);
    }

    #[test]
    fn test_company_size_aliases() {
        assert_eq!(CompanySize::normalize("startup"), CompanySize::Small);
        assert_eq!(CompanySize::normalize("1000+ employees"), CompanySize::Enterprise);
        assert_eq!(CompanySize::normalize("Large"), CompanySize::Large);
        assert_eq!(CompanySize::normalize("gigantic"), CompanySize::Medium);
    }

    #[test]
    fn test_experience_aliases() {
        assert_eq!(ExperienceLevel::normalize("Senior Level"), Some(ExperienceLevel::Senior));
        assert_eq!(ExperienceLevel::normalize("junior"), Some(ExperienceLevel::Entry));
        assert_eq!(ExperienceLevel::normalize("sr"), Some(ExperienceLevel::Senior));
        assert_eq!(ExperienceLevel::normalize("Principal"), Some(ExperienceLevel::Executive));
        assert_eq!(ExperienceLevel::normalize(""), None);
        assert_eq!(ExperienceLevel::normalize("wizard"), None);
    }

    #[test]
    fn test_every_canonical_name_round_trips() {
        for level in ExperienceLevel::ALL {
            assert_eq!(ExperienceLevel::normalize(level.as_str()), Some(level));
        }
        for size in CompanySize::ALL {
            assert_eq!(CompanySize::normalize(size.as_str()), size);
        }
        for location in CompanyLocation::ALL {
            assert_eq!(CompanyLocation::normalize(location.as_str()), location);
        }
    }
}
