use serde::{Deserialize, Serialize};

use crate::{Client, ClientResult};

/// A block of LRC-formatted lyric text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LyricBody {
    /// The raw LRC text. May be empty for instrumentals.
    #[serde(default)]
    pub lyric: String,
}

/// Response from the `/lyric` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LyricResponse {
    /// The original-language lyrics.
    #[serde(default)]
    pub lrc: Option<LyricBody>,
    /// The translated lyrics, if the song has a translation.
    #[serde(default)]
    pub tlyric: Option<LyricBody>,
}
impl LyricResponse {
    /// The original-language lyric text, if present and non-blank.
    pub fn lrc_text(&self) -> Option<&str> {
        self.lrc
            .as_ref()
            .map(|body| body.lyric.as_str())
            .filter(|text| !text.trim().is_empty())
    }
}

/// Lyric-related functionality.
impl Client {
    /// Get the lyrics of a song by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid.
    pub async fn get_lyric(&self, id: impl Into<String>) -> ClientResult<LyricResponse> {
        self.request::<LyricResponse>("lyric", &[("id", id.into())])
            .await
    }
}
