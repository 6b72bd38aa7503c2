use crate::aggregate::{count_by_genre, count_by_month, Distribution};
use crate::track::CanonicalTrack;

/// Chart display labels for the twelve months, index-aligned with
/// [`count_by_month`](crate::aggregate::count_by_month).
pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// The chart-agnostic projection handed to the rendering layer.
///
/// Everything in here is plain data, recomputed from scratch for whichever
/// subset (full or filtered) is being displayed. How it gets drawn, and
/// whether the renderer patches or fully redraws, is the renderer's business.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// One `(track name, popularity)` pair per input track, in input order.
    pub popularity: Vec<(String, u8)>,
    /// Tracks per genre, first-occurrence order.
    pub genres: Distribution,
    /// Tracks per release month, labeled `Jan` through `Dec`.
    pub months: Vec<(&'static str, usize)>,
}

impl DashboardView {
    pub fn project(tracks: &[CanonicalTrack]) -> Self {
        let popularity = tracks
            .iter()
            .map(|track| (track.name.clone(), track.popularity))
            .collect();
        let genres = count_by_genre(tracks);
        let months = MONTH_LABELS
            .iter()
            .copied()
            .zip(count_by_month(tracks))
            .collect();

        Self {
            popularity,
            genres,
            months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn track(name: &str, popularity: u8, genre: &str, month: u32) -> CanonicalTrack {
        CanonicalTrack {
            name: name.to_string(),
            artist: "Artist".to_string(),
            popularity,
            release_date: NaiveDate::from_ymd_opt(2023, month + 1, 1).unwrap(),
            genre: genre.to_string(),
        }
    }

    #[test]
    fn test_projection_shapes() {
        let tracks = vec![
            track("A", 90, "pop", 0),
            track("B", 55, "rock", 0),
            track("C", 73, "pop", 5),
        ];

        let view = DashboardView::project(&tracks);

        assert_eq!(
            view.popularity,
            vec![
                ("A".to_string(), 90),
                ("B".to_string(), 55),
                ("C".to_string(), 73)
            ]
        );
        assert_eq!(view.genres.count("pop"), 2);
        assert_eq!(view.genres.count("rock"), 1);
        assert_eq!(view.months.len(), 12);
        assert_eq!(view.months[0], ("Jan", 2));
        assert_eq!(view.months[5], ("Jun", 1));
        assert_eq!(view.months[11], ("Dec", 0));
    }

    #[test]
    fn test_projection_of_empty_subset() {
        let view = DashboardView::project(&[]);
        assert!(view.popularity.is_empty());
        assert!(view.genres.is_empty());
        assert_eq!(view.months.len(), 12);
        assert!(view.months.iter().all(|(_, count)| *count == 0));
    }
}
