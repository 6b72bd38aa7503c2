use crate::track::CanonicalTrack;

/// Count of items per category label, in first-occurrence order.
///
/// Distributions are rebuilt from scratch on every aggregation pass and never
/// updated incrementally. Lookups are linear, which is fine for the handful
/// of genres a single result page produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Distribution {
    entries: Vec<(String, usize)>,
}

impl Distribution {
    fn bump(&mut self, label: &str) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| l == label) {
            entry.1 += 1;
        } else {
            self.entries.push((label.to_string(), 1));
        }
    }

    /// Count for a label, zero when the label never occurred.
    pub fn count(&self, label: &str) -> usize {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(label, _)| label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(label, count)| (label.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts; equals the number of aggregated tracks.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

/// Group tracks by exact genre string.
///
/// Label order is the order genres first appear in the input; total over any
/// input, including the empty sequence.
pub fn count_by_genre(tracks: &[CanonicalTrack]) -> Distribution {
    let mut distribution = Distribution::default();
    for track in tracks {
        distribution.bump(&track.genre);
    }
    distribution
}

/// Count tracks per release month. Slot `i` holds the number of tracks
/// released in month `i` (0 = January); all twelve slots are always present.
pub fn count_by_month(tracks: &[CanonicalTrack]) -> [usize; 12] {
    let mut counts = [0; 12];
    for track in tracks {
        counts[track.release_month() as usize] += 1;
    }
    counts
}
