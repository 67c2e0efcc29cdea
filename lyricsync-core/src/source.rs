//! Where the engine learns what is playing and what the lyrics are.
use std::future::Future;

use crate::{SyncError, TrackId, TrackIdentity, ne};

/// The remote the engine follows. Failures are returned as values; the
/// engine decides how to report them.
pub trait TrackSource: Send + Sync + 'static {
    /// Whether credentials are present. Checked once when syncing starts.
    fn is_authenticated(&self) -> bool;

    /// The most recently played track, or `None` if there isn't one.
    fn fetch_recent_track(
        &self,
    ) -> impl Future<Output = Result<Option<TrackIdentity>, SyncError>> + Send;

    /// Raw LRC text for a track, or `None` if the track has no lyrics.
    fn fetch_lyrics(
        &self,
        id: &TrackId,
    ) -> impl Future<Output = Result<Option<String>, SyncError>> + Send;
}

impl TrackSource for ne::Client {
    fn is_authenticated(&self) -> bool {
        self.has_cookie()
    }

    async fn fetch_recent_track(&self) -> Result<Option<TrackIdentity>, SyncError> {
        let songs = self.get_recent_songs(1).await.map_err(transient)?;
        Ok(songs
            .into_iter()
            .next()
            .map(|entry| TrackIdentity::from(entry.into_song())))
    }

    async fn fetch_lyrics(&self, id: &TrackId) -> Result<Option<String>, SyncError> {
        let response = self.get_lyric(id.0.as_str()).await.map_err(transient)?;
        Ok(response.lrc_text().map(str::to_string))
    }
}

fn transient(error: ne::ClientError) -> SyncError {
    SyncError::TransientNetworkFailure {
        error: error.to_string(),
    }
}
