//! Analytics query client: filter encoding, aggregate payloads, data
//! sufficiency gating and the per-panel state machine.

mod panel;
mod query;
mod report;
mod sufficiency;

pub use panel::{AnalyticsPanel, PanelState};
pub use query::{AnalyticsQuery, Filter, SalaryRange, ALL};
pub use report::{
    filter_options, AnalyticsMetadata, AnalyticsResult, CompanySizeStats, DataSummary,
    ExperienceStats, FilterOption, JobTitleStats, LocationStats, SalaryBucket, SkillStats,
    TrendPoint,
};
pub use sufficiency::{DataSufficiency, MIN_RECORDS_FOR_CHARTS};
