use crate::track::CanonicalTrack;

/// The pair of optional constraints currently active in the UI.
///
/// A fresh selection is constructed on every control change and never
/// persisted. `None` on either axis means no restriction on that axis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSelection {
    /// Genre constraint, matched case-insensitively against the exact string.
    pub genre: Option<String>,
    /// Zero-based month index (0 = January).
    pub month: Option<u32>,
}

impl FilterSelection {
    /// A selection with no restriction on either axis.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_genre(genre: impl Into<String>) -> Self {
        Self {
            genre: Some(genre.into()),
            month: None,
        }
    }

    pub fn with_month(month: u32) -> Self {
        Self {
            genre: None,
            month: Some(month),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        self.genre.is_none() && self.month.is_none()
    }

    fn matches(&self, track: &CanonicalTrack) -> bool {
        let genre_ok = self
            .genre
            .as_deref()
            .map_or(true, |genre| track.genre.eq_ignore_ascii_case(genre));
        let month_ok = self
            .month
            .map_or(true, |month| track.release_month() == month);
        genre_ok && month_ok
    }
}

/// Apply a selection to the canonical sequence, producing the retained subset.
///
/// A track is retained iff both axes match (conjunctive filtering across the
/// two independent axes). Relative order is preserved, and an unrestricted
/// selection returns the input unchanged.
pub fn apply(tracks: &[CanonicalTrack], selection: &FilterSelection) -> Vec<CanonicalTrack> {
    tracks
        .iter()
        .filter(|track| selection.matches(track))
        .cloned()
        .collect()
}
