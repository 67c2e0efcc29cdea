use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, de::DeserializeOwned};

use crate::{Client, ClientError, ClientResult};

/// Making requests to the NetEase API.
impl Client {
    /// Make a request to the NetEase API. `T` describes the fields of the
    /// response body next to `code`: for `/lyric`, `T` should be
    /// `{ lrc: Option<LyricBody> }`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is not valid.
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        parameters: &[(&str, String)],
    ) -> ClientResult<T> {
        let bytes = self.request_raw(endpoint, parameters).await?;
        Self::parse_response::<T>(&bytes)
    }

    pub(crate) async fn request_raw(
        &self,
        endpoint: &str,
        parameters: &[(&str, String)],
    ) -> ClientResult<Vec<u8>> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let request = self
            .client
            .get(format!("{}/{}", self.base_url, endpoint.trim_start_matches('/')))
            .query(parameters)
            .query(&[
                ("cookie", self.cookie.clone()),
                ("timestamp", timestamp.to_string()),
                ("randomCNIP", "true".to_string()),
            ]);

        Ok(request.send().await?.bytes().await?.into())
    }

    pub(crate) fn parse_response<T: DeserializeOwned>(bytes: &[u8]) -> ClientResult<T> {
        let envelope: Envelope = serde_json::from_slice(bytes)?;
        if envelope.code != Self::SUCCESS_CODE {
            return Err(ClientError::ApiError {
                code: envelope.code,
                message: envelope.message.or(envelope.msg),
            });
        }

        Ok(serde_json::from_slice(bytes)?)
    }

    const SUCCESS_CODE: i64 = 200;
}

#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
}
