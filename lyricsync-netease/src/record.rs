use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult};

/// An artist credited on a song.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artist {
    /// The artist ID.
    #[serde(default)]
    pub id: u64,
    /// The artist name.
    #[serde(default)]
    pub name: Option<String>,
}

/// The album a song belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    /// The album ID.
    #[serde(default)]
    pub id: u64,
    /// The album name.
    #[serde(default)]
    pub name: Option<String>,
    /// The URL of the album cover.
    #[serde(default)]
    pub pic_url: Option<String>,
}

/// A song, as returned by the NetEase API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Song {
    /// The song ID.
    pub id: u64,
    /// The song name.
    #[serde(default)]
    pub name: Option<String>,
    /// The credited artists.
    #[serde(default)]
    pub ar: Vec<Artist>,
    /// The album.
    #[serde(default)]
    pub al: Option<Album>,
    /// The duration in milliseconds.
    #[serde(default)]
    pub dt: Option<u64>,
}

/// An entry of the recently played list. Depending on the API deployment,
/// the song is either wrapped in a `data` field or inlined.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecentSong {
    /// `{ "data": { ...song } }`
    Wrapped {
        /// The wrapped song.
        data: Song,
    },
    /// `{ ...song }`
    Bare(Song),
}
impl RecentSong {
    /// The song, regardless of how it was wrapped.
    pub fn song(&self) -> &Song {
        match self {
            RecentSong::Wrapped { data } => data,
            RecentSong::Bare(song) => song,
        }
    }

    /// Consume the entry, returning the song.
    pub fn into_song(self) -> Song {
        match self {
            RecentSong::Wrapped { data } => data,
            RecentSong::Bare(song) => song,
        }
    }
}

/// Recently-played endpoints.
impl Client {
    /// Get the most recently played songs of the logged-in account, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid.
    pub async fn get_recent_songs(&self, limit: u32) -> ClientResult<Vec<RecentSong>> {
        #[derive(Deserialize)]
        struct RecentSongsResponse {
            #[serde(default)]
            data: Option<RecentSongsData>,
        }
        #[derive(Deserialize)]
        struct RecentSongsData {
            #[serde(default)]
            list: Vec<RecentSong>,
        }

        Ok(self
            .request::<RecentSongsResponse>("record/recent/song", &[("limit", limit.to_string())])
            .await?
            .data
            .map(|d| d.list)
            .unwrap_or_default())
    }
}
