use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, ToSmolStr as _};

use crate::ne;

/// A track ID. Opaque: only ever compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub SmolStr);
impl std::fmt::Display for TrackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl From<&str> for TrackId {
    fn from(id: &str) -> Self {
        TrackId(id.into())
    }
}

/// The track the remote reports as most recently played.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackIdentity {
    pub id: TrackId,
    pub display_name: String,
    /// Artist names joined with `, `.
    pub artists: String,
    pub album: String,
    pub cover_url: Option<String>,
    pub duration_ms: u64,
}
impl TrackIdentity {
    pub const UNKNOWN_TITLE: &str = "Unknown title";
    pub const UNKNOWN_ARTIST: &str = "Unknown artist";
    pub const UNKNOWN_ALBUM: &str = "Unknown album";
    pub const DEFAULT_DURATION_MS: u64 = 180_000;
    const COVER_SIZE_PARAM: &str = "?param=300y300";

    pub fn duration_secs(&self) -> f64 {
        self.duration_ms as f64 / 1000.0
    }

    /// Same track, regardless of metadata.
    pub fn is_same_track(&self, other: &TrackIdentity) -> bool {
        self.id == other.id
    }
}
impl From<ne::Song> for TrackIdentity {
    fn from(song: ne::Song) -> Self {
        let artists: Vec<String> = song.ar.into_iter().filter_map(|a| a.name).collect();
        let (album, cover_url) = match song.al {
            Some(al) => (
                al.name,
                al.pic_url
                    .filter(|url| !url.is_empty())
                    .map(|url| format!("{url}{}", Self::COVER_SIZE_PARAM)),
            ),
            None => (None, None),
        };
        TrackIdentity {
            id: TrackId(song.id.to_smolstr()),
            display_name: song
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| Self::UNKNOWN_TITLE.to_string()),
            artists: if artists.is_empty() {
                Self::UNKNOWN_ARTIST.to_string()
            } else {
                artists.join(", ")
            },
            album: album
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| Self::UNKNOWN_ALBUM.to_string()),
            cover_url,
            duration_ms: song
                .dt
                .filter(|&dt| dt > 0)
                .unwrap_or(Self::DEFAULT_DURATION_MS),
        }
    }
}
