use crate::error::SpotifyError;
use crate::Result;
use serde::Deserialize;

// =============================================================================
// Wire types for the two catalog endpoints
// =============================================================================

#[derive(Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Deserialize)]
pub struct SearchResponse {
    pub tracks: SearchTracks,
}

#[derive(Deserialize)]
pub struct SearchTracks {
    pub items: Vec<RawTrack>,
}

/// One track exactly as the search endpoint returns it.
///
/// Fields the normalizer validates itself (artist list, release date) are
/// deserialized leniently so that a structurally incomplete record surfaces
/// as a normalization error naming its index, not as an opaque JSON error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTrack {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<RawArtist>,
    pub popularity: u8,
    pub album: RawAlbum,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawArtist {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAlbum {
    pub name: String,
    pub release_date: String,
}

pub fn parse_token_response(json: &str) -> Result<String> {
    let response: TokenResponse =
        serde_json::from_str(json).map_err(|e| SpotifyError::Parse(e.to_string()))?;
    Ok(response.access_token)
}

pub fn parse_search_response(json: &str) -> Result<Vec<RawTrack>> {
    let response: SearchResponse =
        serde_json::from_str(json).map_err(|e| SpotifyError::Parse(e.to_string()))?;
    Ok(response.tracks.items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token_response() {
        let json = r##"{
            "access_token": "BQDWyC2Fv",
            "token_type": "Bearer",
            "expires_in": 3600
        }"##;

        let token = parse_token_response(json).unwrap();
        assert_eq!(token, "BQDWyC2Fv");
    }

    #[test]
    fn test_parse_token_response_rejects_bad_json() {
        let err = parse_token_response("{\"error\": \"invalid_client\"}").unwrap_err();
        assert!(matches!(err, SpotifyError::Parse(_)));
    }

    #[test]
    fn test_parse_search_response() {
        let json = r##"{
            "tracks": {
                "items": [
                    {
                        "name": "Test Track",
                        "artists": [{"name": "Test Artist", "genres": ["pop"]}],
                        "popularity": 83,
                        "album": {"name": "Test Album", "release_date": "2023-04-14"}
                    },
                    {
                        "name": "Sparse Track",
                        "artists": [{"name": "Other Artist"}],
                        "popularity": 12,
                        "album": {"name": "Other Album", "release_date": "2023-11"}
                    }
                ]
            }
        }"##;

        let tracks = parse_search_response(json).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name, "Test Track");
        assert_eq!(tracks[0].artists[0].name, "Test Artist");
        assert_eq!(tracks[0].artists[0].genres, vec!["pop"]);
        assert_eq!(tracks[0].popularity, 83);
        assert_eq!(tracks[0].album.release_date, "2023-04-14");
        // genres are optional on the wire
        assert!(tracks[1].artists[0].genres.is_empty());
    }

    #[test]
    fn test_parse_search_response_allows_empty_artists() {
        // An empty artist list parses fine; rejecting it is the normalizer's job.
        let json = r##"{
            "tracks": {
                "items": [
                    {
                        "name": "Orphan Track",
                        "artists": [],
                        "popularity": 5,
                        "album": {"name": "X", "release_date": "2023-01-01"}
                    }
                ]
            }
        }"##;

        let tracks = parse_search_response(json).unwrap();
        assert_eq!(tracks.len(), 1);
        assert!(tracks[0].artists.is_empty());
    }

    #[test]
    fn test_parse_search_response_rejects_missing_items() {
        let err = parse_search_response("{\"tracks\": {}}").unwrap_err();
        assert!(matches!(err, SpotifyError::Parse(_)));
    }
}
