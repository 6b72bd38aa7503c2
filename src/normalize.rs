use crate::api::RawTrack;
use crate::error::SpotifyError;
use crate::track::CanonicalTrack;
use crate::Result;
use chrono::NaiveDate;

/// Genre assigned when the primary artist carries no genre list.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Convert one page of raw search results into canonical tracks.
///
/// Normalization is fail-fast: the first record missing a required field
/// aborts the whole batch with [`SpotifyError::Normalization`] naming the
/// offending index, so a partially normalized page can never reach the
/// dashboard. A record needs a name, at least one artist, and a parseable
/// album release date; the first artist supplies the display name and the
/// genre, falling back to [`UNKNOWN_GENRE`].
pub fn normalize_tracks(raw: Vec<RawTrack>) -> Result<Vec<CanonicalTrack>> {
    raw.into_iter()
        .enumerate()
        .map(|(index, track)| normalize_track(index, track))
        .collect()
}

fn normalize_track(index: usize, raw: RawTrack) -> Result<CanonicalTrack> {
    if raw.name.is_empty() {
        return Err(SpotifyError::Normalization {
            index,
            reason: "track has no name".to_string(),
        });
    }

    let artist = raw
        .artists
        .first()
        .ok_or_else(|| SpotifyError::Normalization {
            index,
            reason: "track has no artists".to_string(),
        })?;

    let release_date =
        parse_release_date(&raw.album.release_date).ok_or_else(|| SpotifyError::Normalization {
            index,
            reason: format!("unparseable release date {:?}", raw.album.release_date),
        })?;

    let genre = artist
        .genres
        .first()
        .cloned()
        .unwrap_or_else(|| UNKNOWN_GENRE.to_string());

    Ok(CanonicalTrack {
        name: raw.name,
        artist: artist.name.clone(),
        popularity: raw.popularity,
        release_date,
        genre,
    })
}

/// Release dates come back in three precisions: `YYYY-MM-DD`, `YYYY-MM` and
/// `YYYY`. Coarser precisions are clamped to the first day they cover.
/// Anything else is rejected rather than defaulted.
fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{raw}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    let year: i32 = raw.parse().ok()?;
    NaiveDate::from_ymd_opt(year, 1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{RawAlbum, RawArtist};

    fn raw_track(name: &str, artists: Vec<RawArtist>, release_date: &str) -> RawTrack {
        RawTrack {
            name: name.to_string(),
            artists,
            popularity: 50,
            album: RawAlbum {
                name: format!("{name} (album)"),
                release_date: release_date.to_string(),
            },
        }
    }

    fn artist(name: &str, genres: &[&str]) -> RawArtist {
        RawArtist {
            name: name.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn test_normalize_full_record() {
        let raw = vec![raw_track(
            "Vampire",
            vec![artist("Olivia Rodrigo", &["pop", "pop rock"]), artist("Guest", &[])],
            "2023-06-30",
        )];

        let tracks = normalize_tracks(raw).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Vampire");
        // first artist wins
        assert_eq!(tracks[0].artist, "Olivia Rodrigo");
        // first genre of the first artist wins
        assert_eq!(tracks[0].genre, "pop");
        assert_eq!(
            tracks[0].release_date,
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()
        );
    }

    #[test]
    fn test_normalize_falls_back_to_unknown_genre() {
        let raw = vec![raw_track("Song", vec![artist("Somebody", &[])], "2023-02-03")];

        let tracks = normalize_tracks(raw).unwrap();
        assert_eq!(tracks[0].genre, UNKNOWN_GENRE);
    }

    #[test]
    fn test_normalize_rejects_empty_artist_list() {
        let raw = vec![
            raw_track("Fine", vec![artist("A", &[])], "2023-01-01"),
            raw_track("Orphan", vec![], "2023-01-01"),
        ];

        let err = normalize_tracks(raw).unwrap_err();
        match err {
            SpotifyError::Normalization { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("no artists"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_rejects_empty_name() {
        let raw = vec![raw_track("", vec![artist("A", &[])], "2023-01-01")];

        let err = normalize_tracks(raw).unwrap_err();
        assert!(matches!(err, SpotifyError::Normalization { index: 0, .. }));
    }

    #[test]
    fn test_release_date_precisions() {
        assert_eq!(
            parse_release_date("2023-04-14"),
            NaiveDate::from_ymd_opt(2023, 4, 14)
        );
        // month precision clamps to the first of the month
        assert_eq!(
            parse_release_date("2023-11"),
            NaiveDate::from_ymd_opt(2023, 11, 1)
        );
        // year precision clamps to January 1st
        assert_eq!(
            parse_release_date("2023"),
            NaiveDate::from_ymd_opt(2023, 1, 1)
        );
    }

    #[test]
    fn test_unparseable_release_date_is_a_normalization_error() {
        assert_eq!(parse_release_date("not-a-date"), None);
        assert_eq!(parse_release_date(""), None);

        let raw = vec![raw_track("Song", vec![artist("A", &[])], "not-a-date")];
        let err = normalize_tracks(raw).unwrap_err();
        match err {
            SpotifyError::Normalization { index, reason } => {
                assert_eq!(index, 0);
                assert!(reason.contains("not-a-date"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_normalize_empty_page() {
        assert_eq!(normalize_tracks(Vec::new()).unwrap(), Vec::new());
    }
}
