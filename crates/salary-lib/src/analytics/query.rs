//! Analytics filter state and its query-string encoding

use crate::models::{CompanySize, ExperienceLevel};
use std::fmt;
use std::str::FromStr;

/// Sentinel the service and the filter dropdowns use for "no filter"
pub const ALL: &str = "All";

/// A single filter: either the "All" sentinel or one concrete value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Filter<T> {
    All,
    Only(T),
}

impl<T> Default for Filter<T> {
    fn default() -> Self {
        Filter::All
    }
}

impl<T> Filter<T> {
    pub fn is_active(&self) -> bool {
        matches!(self, Filter::Only(_))
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Filter::All => None,
            Filter::Only(v) => Some(v),
        }
    }
}

impl<T> From<Option<T>> for Filter<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Filter::All, Filter::Only)
    }
}

impl<T: fmt::Display> fmt::Display for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::All => f.write_str(ALL),
            Filter::Only(v) => v.fmt(f),
        }
    }
}

/// Salary bands the analytics service can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalaryRange {
    From50kTo100k,
    From100kTo150k,
    Over150k,
}

impl SalaryRange {
    pub const ALL: [SalaryRange; 3] = [
        SalaryRange::From50kTo100k,
        SalaryRange::From100kTo150k,
        SalaryRange::Over150k,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryRange::From50kTo100k => "50k-100k",
            SalaryRange::From100kTo150k => "100k-150k",
            SalaryRange::Over150k => "150k+",
        }
    }
}

impl fmt::Display for SalaryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalaryRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        SalaryRange::ALL
            .into_iter()
            .find(|r| r.as_str() == needle)
            .ok_or_else(|| {
                format!(
                    "Unknown salary range '{}' (expected one of: 50k-100k, 100k-150k, 150k+)",
                    s
                )
            })
    }
}

/// Filter state for the analytics overview.
///
/// Only active filters are sent; "All" means the parameter is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub location: Filter<String>,
    pub experience_level: Filter<ExperienceLevel>,
    pub company_size: Filter<CompanySize>,
    pub salary_range: Filter<SalaryRange>,
}

impl AnalyticsQuery {
    /// True when at least one filter narrows the dataset
    pub fn is_filtered(&self) -> bool {
        !self.query_pairs().is_empty()
    }

    /// Query parameters in wire order, "All" filters omitted
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(location) = self.location.value() {
            // An explicit "All" location string is still the sentinel
            if location != ALL && !location.trim().is_empty() {
                pairs.push(("location", location.clone()));
            }
        }
        if let Some(level) = self.experience_level.value() {
            pairs.push(("experienceLevel", level.as_str().to_string()));
        }
        if let Some(size) = self.company_size.value() {
            pairs.push(("companySize", size.as_str().to_string()));
        }
        if let Some(range) = self.salary_range.value() {
            pairs.push(("salaryRange", range.as_str().to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_query_sends_nothing() {
        let query = AnalyticsQuery::default();
        assert!(!query.is_filtered());
        assert!(query.query_pairs().is_empty());
    }

    #[test]
    fn test_only_active_filters_are_serialized() {
        let query = AnalyticsQuery {
            location: Filter::Only("United States".to_string()),
            salary_range: Filter::Only(SalaryRange::Over150k),
            ..Default::default()
        };
        assert!(query.is_filtered());
        assert_eq!(
            query.query_pairs(),
            [
                ("location", "United States".to_string()),
                ("salaryRange", "150k+".to_string())
            ]
        );
    }

    #[test]
    fn test_all_filters_in_wire_order() {
        let query = AnalyticsQuery {
            location: Filter::Only("Germany".to_string()),
            experience_level: Filter::Only(ExperienceLevel::Senior),
            company_size: Filter::Only(CompanySize::Large),
            salary_range: Filter::Only(SalaryRange::From100kTo150k),
        };
        let keys: Vec<_> = query.query_pairs().into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["location", "experienceLevel", "companySize", "salaryRange"]);
        assert_eq!(query.query_pairs()[1].1, "Senior Level");
    }

    #[test]
    fn test_literal_all_location_is_omitted() {
        let query = AnalyticsQuery {
            location: Filter::Only("All".to_string()),
            ..Default::default()
        };
        assert!(query.query_pairs().is_empty());
        assert!(!query.is_filtered());
    }

    #[test]
    fn test_salary_range_parsing() {
        assert_eq!("150K+".parse::<SalaryRange>(), Ok(SalaryRange::Over150k));
        assert_eq!(" 50k-100k".parse::<SalaryRange>(), Ok(SalaryRange::From50kTo100k));
        assert!("200k+".parse::<SalaryRange>().is_err());
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(Filter::<CompanySize>::All.to_string(), "All");
        assert_eq!(Filter::Only(CompanySize::Small).to_string(), "Small");
        assert_eq!(Filter::from(Some(3)), Filter::Only(3));
        assert_eq!(Filter::<u8>::from(None), Filter::All);
    }
}
