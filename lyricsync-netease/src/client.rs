#[derive(Debug)]
/// An error that can occur when interacting with the client.
pub enum ClientError {
    /// An error that occurred when making a request.
    ReqwestError(reqwest::Error),
    /// An error that occurred when deserializing a response.
    DeserializationError(serde_json::Error),
    /// The API answered with a non-success code.
    ApiError {
        /// The code returned by the API.
        code: i64,
        /// The message returned by the API, if any.
        message: Option<String>,
    },
}
impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClientError::ReqwestError(e) => write!(f, "Reqwest error: {e}"),
            ClientError::DeserializationError(e) => write!(f, "Deserialization error: {e}"),
            ClientError::ApiError { code, message } => {
                write!(f, "NetEase API error: {code}")?;
                if let Some(message) = message {
                    write!(f, ": {message}")?;
                }
                Ok(())
            }
        }
    }
}
impl std::error::Error for ClientError {}
impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        ClientError::ReqwestError(e)
    }
}
impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::DeserializationError(e)
    }
}
/// A result type for the client.
pub type ClientResult<T> = Result<T, ClientError>;

/// A client for the NetEase Cloud Music API.
pub struct Client {
    pub(crate) base_url: String,
    pub(crate) cookie: String,
    pub(crate) client: reqwest::Client,
}
impl Client {
    /// The public API deployment used when no base URL is configured.
    pub const DEFAULT_BASE_URL: &str = "https://neteaseapi-enhanced.vercel.app";

    /// Create a new client.
    ///
    /// `cookie` is the login cookie of the account to follow. An empty cookie
    /// is accepted, but the account-bound endpoints will fail with it.
    pub fn new(base_url: impl Into<String>, cookie: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            cookie: cookie.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Whether a login cookie is present.
    pub fn has_cookie(&self) -> bool {
        !self.cookie.trim().is_empty()
    }
}
