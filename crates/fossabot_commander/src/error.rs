use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::http::Headers;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot parse the fossabot response as json: {0}")]
    JsonParsing(#[source] serde_json::Error),

    #[error(transparent)]
    RateLimit(ApiError),

    #[error("cannot validate the fossabot request: {0}")]
    CannotValidateRequest(#[source] ApiError),

    #[error("cannot get the fossabot context: {0}")]
    CannotGetContext(#[source] ApiError),

    #[error("cannot create the fossabot context: {0}")]
    CannotCreateContext(#[source] serde_json::Error),

    #[error("cannot execute the command: {0}")]
    CannotExecuteCommand(#[source] anyhow::Error),

    #[error("cannot find {model} data for key [{key}]")]
    InvalidArgument { model: &'static str, key: String },

    #[error("logging was enabled but no logger was configured")]
    NoValidLoggerConfigured,
}

impl Error {
    /// The api failure behind this error, if it came from the fossabot api
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::RateLimit(err) | Self::CannotValidateRequest(err) | Self::CannotGetContext(err) => {
                Some(err)
            }
            _ => None,
        }
    }

    pub const fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimit(..))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The api rejected the token (400)
    InvalidToken,
    /// The api throttled the request (429)
    RateLimit(RateLimit),
    /// Any other non-200 response
    Generic,
}

/// The rate limit bucket reported with a 429.
///
/// A field is `None` when its header was missing or not a number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    total: Option<u64>,
    remaining: Option<u64>,
    resets_at: Option<DateTime<Utc>>,
}

impl RateLimit {
    const TOTAL: &'static str = "x-ratelimit-total";
    const REMAINING: &'static str = "x-ratelimit-remaining";
    const RESET: &'static str = "x-ratelimit-reset";

    pub const fn new(
        total: Option<u64>,
        remaining: Option<u64>,
        resets_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            total,
            remaining,
            resets_at,
        }
    }

    pub fn from_headers(headers: &Headers) -> Self {
        let number = |key| headers.get(key).and_then(|s| s.trim().parse::<u64>().ok());
        Self {
            total: number(Self::TOTAL),
            remaining: number(Self::REMAINING),
            resets_at: headers
                .get(Self::RESET)
                .and_then(|s| s.trim().parse::<i64>().ok())
                .and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        }
    }

    /// Size of the bucket
    pub const fn total(&self) -> Option<u64> {
        self.total
    }

    /// Requests left in the bucket
    pub const fn remaining(&self) -> Option<u64> {
        self.remaining
    }

    /// When the bucket is refilled
    pub const fn resets_at(&self) -> Option<DateTime<Utc>> {
        self.resets_at
    }
}

/// A failed call to the fossabot api.
#[derive(Debug)]
pub struct ApiError {
    kind: ApiErrorKind,
    code: String,
    error_class: String,
    error_message: String,
    status_code: u16,
    body: Option<Value>,
    source: Option<anyhow::Error>,
}

impl ApiError {
    const UNKNOWN_CODE: &'static str = "unknown";
    const UNKNOWN_CLASS: &'static str = "Unknown Error";
    const UNKNOWN_MESSAGE: &'static str =
        "An unknown error occurred. Could not get message from Fossabot response.";

    pub fn new(
        kind: ApiErrorKind,
        code: impl Into<String>,
        error_class: impl Into<String>,
        error_message: impl Into<String>,
        status_code: u16,
        body: Option<Value>,
    ) -> Self {
        Self {
            kind,
            code: code.into(),
            error_class: error_class.into(),
            error_message: error_message.into(),
            status_code,
            body,
            source: None,
        }
    }

    /// Classifies a non-200 response by its status code.
    pub fn from_response(body: Value, status_code: u16, headers: &Headers) -> Self {
        Self::classify(Some(body), status_code, headers)
    }

    /// Classifies a non-200 response whose body was not json.
    ///
    /// Every body derived field gets its default.
    pub fn from_status(status_code: u16, headers: &Headers) -> Self {
        Self::classify(None, status_code, headers)
    }

    fn classify(body: Option<Value>, status_code: u16, headers: &Headers) -> Self {
        let field = |key: &str, default: &str| {
            body.as_ref()
                .and_then(|body| body.get(key))
                .and_then(Value::as_str)
                .unwrap_or(default)
                .to_string()
        };

        let code = field("code", Self::UNKNOWN_CODE);
        let error_class = field("error", Self::UNKNOWN_CLASS);
        let error_message = field("message", Self::UNKNOWN_MESSAGE);

        let kind = match status_code {
            400 => ApiErrorKind::InvalidToken,
            429 => ApiErrorKind::RateLimit(RateLimit::from_headers(headers)),
            _ => ApiErrorKind::Generic,
        };

        Self::new(kind, code, error_class, error_message, status_code, body)
    }

    /// A failure that never produced an api response, e.g. the transport gave up.
    pub fn unknown(source: anyhow::Error) -> Self {
        let mut this = Self::new(
            ApiErrorKind::Generic,
            Self::UNKNOWN_CODE,
            "unknown_error",
            source.to_string(),
            400,
            None,
        );
        this.source.replace(source);
        this
    }

    pub const fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    /// The `code` field of the response, e.g. `token_invalid`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The `error` field of the response, e.g. `Bad Request`
    pub fn error_class(&self) -> &str {
        &self.error_class
    }

    /// The `message` field of the response
    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// The parsed response body
    pub const fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub const fn rate_limit(&self) -> Option<&RateLimit> {
        match &self.kind {
            ApiErrorKind::RateLimit(rate_limit) => Some(rate_limit),
            _ => None,
        }
    }

    pub const fn is_rate_limit(&self) -> bool {
        matches!(self.kind, ApiErrorKind::RateLimit(..))
    }

    pub const fn is_invalid_token(&self) -> bool {
        matches!(self.kind, ApiErrorKind::InvalidToken)
    }

    /// The message without the response body
    pub fn message(&self) -> String {
        format!(
            "fossabot api error occurred with status code [{}] and message [{}].",
            self.status_code, self.error_message
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())?;
        match &self.body {
            Some(body) => write!(f, " Response: {}", body),
            None => Ok(()),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| &**err as &(dyn std::error::Error + 'static))
    }
}
