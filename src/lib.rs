pub mod aggregate;
pub mod api;
pub mod client;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod session;
pub mod track;
pub mod tui;
pub mod view;

pub use aggregate::{count_by_genre, count_by_month, Distribution};
#[cfg(feature = "mock")]
pub use client::MockSpotifyClient;
pub use client::{SearchQuery, SpotifyClient, SpotifyClientImpl};
pub use error::SpotifyError;
pub use filter::FilterSelection;
pub use normalize::normalize_tracks;
pub use session::DashboardSession;
pub use track::CanonicalTrack;
pub use view::{DashboardView, MONTH_LABELS};

pub type Result<T> = std::result::Result<T, SpotifyError>;
