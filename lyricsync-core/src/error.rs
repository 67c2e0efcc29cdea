use serde::{Deserialize, Serialize};

/// Everything that can go wrong while following the remote.
///
/// None of these are fatal: the worst outcome is that no lyrics are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncError {
    /// No login cookie is stored; syncing cannot start.
    NotAuthenticated,
    /// The remote answered, but nothing has been played.
    NoActiveTrack,
    /// The remote answered, but has no lyrics for the track.
    LyricsUnavailable,
    /// The request failed or the payload was malformed. Retried on the next
    /// poll.
    TransientNetworkFailure { error: String },
    /// A response arrived for a track or request that is no longer current.
    StaleResult,
}
impl SyncError {
    /// Should be paired with [`Self::display_message`]
    pub fn display_name(&self) -> &'static str {
        match self {
            SyncError::NotAuthenticated => "Not logged in",
            SyncError::NoActiveTrack => "No song playing",
            SyncError::LyricsUnavailable => "No lyrics",
            SyncError::TransientNetworkFailure { .. } => "Connection error",
            SyncError::StaleResult => "Stale result",
        }
    }

    /// Should be paired with [`Self::display_name`]
    pub fn display_message(&self) -> String {
        match self {
            SyncError::NotAuthenticated => {
                "Set a NetEase login cookie in the config file before syncing".to_string()
            }
            SyncError::NoActiveTrack => "Nothing has been played recently".to_string(),
            SyncError::LyricsUnavailable => "This track may not have lyrics".to_string(),
            SyncError::TransientNetworkFailure { error } => error.clone(),
            SyncError::StaleResult => "Response discarded".to_string(),
        }
    }
}
impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.display_name(), self.display_message())
    }
}
impl std::error::Error for SyncError {}

/// Connection status reported to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SyncStatus {
    #[default]
    Ready,
    Connecting,
    Connected,
    NoSong,
    Error(SyncError),
}
impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Ready => "Ready",
            SyncStatus::Connecting => "Connecting...",
            SyncStatus::Connected => "Connected",
            SyncStatus::NoSong => "No song playing",
            SyncStatus::Error(e) => e.display_name(),
        }
    }

    pub fn is_syncing(&self) -> bool {
        matches!(
            self,
            SyncStatus::Connecting
                | SyncStatus::Connected
                | SyncStatus::NoSong
                | SyncStatus::Error(SyncError::TransientNetworkFailure { .. })
        )
    }
}
impl std::fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
