use chrono::{Datelike, NaiveDate};
use std::fmt;

/// Normalized track entry used throughout the dashboard core, independent of
/// the catalog API's field names. The full sequence is owned by the session
/// and immutable once loaded; filtered views are derived projections.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTrack {
    pub name: String,
    /// Primary performer's display name.
    pub artist: String,
    /// Popularity score in `0..=100`.
    pub popularity: u8,
    pub release_date: NaiveDate,
    /// First genre of the primary artist, or `"Unknown"`.
    pub genre: String,
}

impl CanonicalTrack {
    /// Zero-based release month (0 = January), the axis shared by the month
    /// chart and the month filter.
    pub fn release_month(&self) -> u32 {
        self.release_date.month0()
    }
}

impl fmt::Display for CanonicalTrack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.artist, self.name)
    }
}
