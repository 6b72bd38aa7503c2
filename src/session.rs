use crate::client::{SearchQuery, SpotifyClient};
use crate::filter::{self, FilterSelection};
use crate::normalize::normalize_tracks;
use crate::track::CanonicalTrack;
use crate::view::DashboardView;
use crate::Result;

/// Genres always offered by the genre selector, ahead of whatever shows up in
/// the loaded data.
const PREDEFINED_GENRES: [&str; 10] = [
    "Pop",
    "Rock",
    "Hip Hop",
    "Electronic",
    "R&B",
    "Classical",
    "Jazz",
    "Country",
    "Folk",
    "Metal",
];

#[derive(Debug, Clone)]
enum SessionState {
    Unloaded,
    Loaded(Vec<CanonicalTrack>),
}

/// Owns the canonical track sequence for one dashboard run.
///
/// The session has exactly two states. It starts `Unloaded`, moves to `Loaded`
/// only once the whole load pipeline (token, search, normalization) has
/// succeeded, and returns to `Unloaded` on [`reset`](Self::reset). A failed
/// load propagates its error and leaves the state untouched, so an empty
/// `Loaded` dashboard can never be observed.
///
/// The canonical sequence is written exactly once per successful load and only
/// read afterwards; filtered views are recomputed projections with no storage
/// of their own.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    query: SearchQuery,
    state: SessionState,
}

impl DashboardSession {
    pub fn new(query: SearchQuery) -> Self {
        Self {
            query,
            state: SessionState::Unloaded,
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, SessionState::Loaded(_))
    }

    /// The canonical tracks, or `None` before a successful load.
    pub fn tracks(&self) -> Option<&[CanonicalTrack]> {
        match &self.state {
            SessionState::Unloaded => None,
            SessionState::Loaded(tracks) => Some(tracks),
        }
    }

    /// Run the load pipeline: fetch a token, search with it, normalize.
    ///
    /// The two network calls are strictly sequential (the search depends on
    /// the token) and any failure is terminal for this attempt. Returns the
    /// number of canonical tracks on success.
    pub async fn load(&mut self, client: &dyn SpotifyClient) -> Result<usize> {
        log::info!("Loading dashboard data for query {:?}", self.query.query);

        let token = client.fetch_access_token().await?;
        let raw = client.search_tracks(&token, &self.query).await?;
        log::debug!("Search returned {} raw tracks", raw.len());

        let tracks = normalize_tracks(raw)?;
        let count = tracks.len();
        self.state = SessionState::Loaded(tracks);

        log::info!("Dashboard loaded with {count} tracks");
        Ok(count)
    }

    /// Drop any loaded data and return to `Unloaded`.
    pub fn reset(&mut self) {
        self.state = SessionState::Unloaded;
    }

    /// Project the canonical sequence through a filter selection.
    ///
    /// The filtered subset and all three chart projections are recomputed from
    /// scratch on every call. Returns `None` while unloaded.
    pub fn view(&self, selection: &FilterSelection) -> Option<DashboardView> {
        let tracks = self.tracks()?;
        if selection.is_unrestricted() {
            return Some(DashboardView::project(tracks));
        }
        let filtered = filter::apply(tracks, selection);
        Some(DashboardView::project(&filtered))
    }

    /// Options for the genre selector: the predefined list merged with the
    /// distinct genres observed in the loaded data, first-occurrence order,
    /// deduplicated case-insensitively.
    pub fn genre_options(&self) -> Vec<String> {
        let mut options: Vec<String> = PREDEFINED_GENRES.iter().map(|g| g.to_string()).collect();
        if let Some(tracks) = self.tracks() {
            for track in tracks {
                if !options.iter().any(|o| o.eq_ignore_ascii_case(&track.genre)) {
                    options.push(track.genre.clone());
                }
            }
        }
        options
    }
}
