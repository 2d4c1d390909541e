//! Data sufficiency classification
//!
//! Gates every analytics view: charts are only drawn over samples of at
//! least [`MIN_RECORDS_FOR_CHARTS`] records.

use std::fmt;

/// Smallest filtered sample rendered as charts
pub const MIN_RECORDS_FOR_CHARTS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSufficiency {
    NoData,
    Insufficient,
    Sufficient,
}

impl DataSufficiency {
    pub fn classify(filtered_records: u64) -> Self {
        match filtered_records {
            0 => DataSufficiency::NoData,
            n if n < MIN_RECORDS_FOR_CHARTS => DataSufficiency::Insufficient,
            _ => DataSufficiency::Sufficient,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataSufficiency::NoData => "no_data",
            DataSufficiency::Insufficient => "insufficient_data",
            DataSufficiency::Sufficient => "sufficient_data",
        }
    }

    /// Guidance shown instead of (or above) the charts
    pub fn guidance(&self, filtered_records: u64, filters_active: bool) -> String {
        match self {
            DataSufficiency::NoData if filters_active => {
                "No records match the current filters. Reset the filters to see the full dataset."
                    .to_string()
            }
            DataSufficiency::NoData => "No data is available yet.".to_string(),
            DataSufficiency::Insufficient => format!(
                "Only {} record{} match the current selection; at least {} are needed for \
                 reliable charts. Broaden the filters to include more data.",
                filtered_records,
                if filtered_records == 1 { "" } else { "s" },
                MIN_RECORDS_FOR_CHARTS
            ),
            DataSufficiency::Sufficient => format!("Showing {} records.", filtered_records),
        }
    }
}

impl fmt::Display for DataSufficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
