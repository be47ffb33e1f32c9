use log::Level;
use serde_json::{json, Value};

use crate::{
    http::{AttoHttpClient, DefaultRequestFactory, HttpClient, RequestFactory},
    util::type_name,
    ApiError, Command, Config, Context, Error, Fields, Logger,
};

pub const FOSSABOT_API_BASE_URL: &str = "https://api.fossabot.com/v2/customapi";

/// Runs [`Command`]s for fossabot custom api requests.
///
/// Every run validates the token, optionally fetches the [`Context`] and then
/// hands it to the command. Nothing is cached or retried between runs.
pub struct Commander {
    http_client: Box<dyn HttpClient>,
    http_client_name: &'static str,
    request_factory: Box<dyn RequestFactory>,
    request_factory_name: &'static str,
    logger: Option<Box<dyn Logger>>,
    logging: bool,
    include_log_context: bool,
    base_url: String,
}

impl std::fmt::Debug for Commander {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Commander")
            .field("http_client", &self.http_client_name)
            .field("request_factory", &self.request_factory_name)
            .field("has_logger", &self.logger.is_some())
            .field("logging", &self.logging)
            .field("include_log_context", &self.include_log_context)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for Commander {
    fn default() -> Self {
        Self::new(AttoHttpClient::default(), DefaultRequestFactory)
    }
}

/// Why a single api call failed
enum Failure {
    Transport(anyhow::Error),
    Json(serde_json::Error),
    Api(ApiError),
}

impl Commander {
    pub fn new<C, F>(http_client: C, request_factory: F) -> Self
    where
        C: HttpClient + 'static,
        F: RequestFactory + 'static,
    {
        Self {
            http_client: Box::new(http_client),
            http_client_name: type_name::<C>(),
            request_factory: Box::new(request_factory),
            request_factory_name: type_name::<F>(),
            logger: None,
            logging: false,
            include_log_context: true,
            base_url: FOSSABOT_API_BASE_URL.to_string(),
        }
    }

    /// Applies a [`Config`]. Enabling logging requires a `logger`.
    pub fn from_config<C, F>(
        config: &Config,
        http_client: C,
        request_factory: F,
        logger: Option<Box<dyn Logger>>,
    ) -> Result<Self, Error>
    where
        C: HttpClient + 'static,
        F: RequestFactory + 'static,
    {
        let mut this = Self::new(http_client, request_factory)
            .with_base_url(config.base_url())
            .with_log_context(config.logging.include_context);
        this.logger = logger;
        this.set_logging(config.logging.enabled)?;
        Ok(this)
    }

    pub fn with_logger<L>(mut self, logger: L) -> Self
    where
        L: Logger + 'static,
    {
        self.set_logger(logger);
        self
    }

    pub fn with_logging(mut self, enabled: bool) -> Result<Self, Error> {
        self.set_logging(enabled)?;
        Ok(self)
    }

    pub fn with_log_context(mut self, include: bool) -> Self {
        self.include_log_context = include;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.set_base_url(base_url);
        self
    }

    pub fn set_http_client<C>(&mut self, http_client: C)
    where
        C: HttpClient + 'static,
    {
        self.http_client = Box::new(http_client);
        self.http_client_name = type_name::<C>();
    }

    pub fn set_request_factory<F>(&mut self, request_factory: F)
    where
        F: RequestFactory + 'static,
    {
        self.request_factory = Box::new(request_factory);
        self.request_factory_name = type_name::<F>();
    }

    pub fn set_logger<L>(&mut self, logger: L)
    where
        L: Logger + 'static,
    {
        self.logger.replace(Box::new(logger));
    }

    /// Removes the logger, which also turns logging off
    pub fn take_logger(&mut self) -> Option<Box<dyn Logger>> {
        self.logging = false;
        self.logger.take()
    }

    /// Fails with [`Error::NoValidLoggerConfigured`] when enabling without a logger
    pub fn set_logging(&mut self, enabled: bool) -> Result<(), Error> {
        if enabled && self.logger.is_none() {
            return Err(Error::NoValidLoggerConfigured);
        }
        self.logging = enabled;
        Ok(())
    }

    /// Whether each log record gets a description of this commander
    pub fn set_log_context(&mut self, include: bool) {
        self.include_log_context = include;
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub const fn is_logging(&self) -> bool {
        self.logging
    }

    pub const fn includes_log_context(&self) -> bool {
        self.include_log_context
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Runs `command`, fetching the context first
    pub fn run<C>(&self, command: &C, token: &str) -> Result<String, Error>
    where
        C: Command + ?Sized,
    {
        self.run_command(command, token, true)
    }

    /// Validates `token`, fetches the context if `fetch_context` and returns
    /// what `command` responds with.
    ///
    /// A rate limited api call is always [`Error::RateLimit`], whichever step
    /// it happened in.
    pub fn run_command<C>(&self, command: &C, token: &str, fetch_context: bool) -> Result<String, Error>
    where
        C: Command + ?Sized,
    {
        self.validate(token)?;

        let context = match fetch_context {
            true => Some(self.context(token)?),
            false => None,
        };

        self.debug(
            "invoking command",
            fields(json!({ "command": type_name::<C>() })),
        );

        command.get_response(context.as_ref()).map_err(|err| {
            self.error(
                &format!("caught an error executing the command: {}", err),
                error_fields(&err),
            );
            Error::CannotExecuteCommand(err)
        })
    }

    fn validate(&self, token: &str) -> Result<(), Error> {
        self.debug(
            "sending request to validate incoming fossabot request",
            Fields::new(),
        );

        let failure = match self.fetch(&self.endpoint("validate", token)) {
            Ok(..) => {
                self.debug("validated fossabot request", Fields::new());
                return Ok(());
            }
            Err(failure) => failure,
        };

        let err = match failure {
            Failure::Api(err) if err.is_rate_limit() => {
                self.error(
                    &format!("rate limited during validation: {}", err.message()),
                    error_fields(&err),
                );
                return Err(Error::RateLimit(err));
            }
            Failure::Api(err) => {
                self.debug(
                    &format!(
                        "received non-200 status [{}] back from validation",
                        err.status_code()
                    ),
                    Fields::new(),
                );
                err
            }
            Failure::Json(err) => ApiError::unknown(err.into()),
            Failure::Transport(err) => ApiError::unknown(err),
        };

        self.error(
            &format!("caught an error during validation: {}", err.error_message()),
            error_fields(&err),
        );
        Err(Error::CannotValidateRequest(err))
    }

    fn context(&self, token: &str) -> Result<Context, Error> {
        self.debug("attempting to get context", Fields::new());

        let body = match self.fetch(&self.endpoint("context", token)) {
            Ok(body) => body,
            Err(failure) => {
                let err = match failure {
                    Failure::Api(err) if err.is_rate_limit() => Error::RateLimit(err),
                    Failure::Api(err) => Error::CannotGetContext(err),
                    Failure::Json(err) => Error::JsonParsing(err),
                    Failure::Transport(err) => Error::CannotGetContext(ApiError::unknown(err)),
                };
                self.error(
                    &format!("caught an error getting context: {}", err),
                    error_fields(&err),
                );
                return Err(err);
            }
        };

        self.debug("successfully received context response", Fields::new());
        self.debug("creating context data model from context response", Fields::new());

        serde_json::from_value(body).map_err(|err| {
            self.error(
                &format!("caught an error creating the context data model: {}", err),
                error_fields(&err),
            );
            Error::CannotCreateContext(err)
        })
    }

    fn fetch(&self, url: &str) -> Result<Value, Failure> {
        let request = self.request_factory.create_get_request(url);
        let response = self.http_client.send(request).map_err(Failure::Transport)?;
        let body = serde_json::from_str::<Value>(response.body());

        // a non-200 is classified by its status even when the body is not json
        match (response.status(), body) {
            (200, body) => body.map_err(Failure::Json),
            (status, Ok(body)) => Err(Failure::Api(ApiError::from_response(
                body,
                status,
                response.headers(),
            ))),
            (status, Err(..)) => Err(Failure::Api(ApiError::from_status(
                status,
                response.headers(),
            ))),
        }
    }

    fn endpoint(&self, path: &str, token: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            path,
            urlencoding::encode(token)
        )
    }

    fn describe(&self) -> Value {
        json!({
            "class": type_name::<Self>(),
            "http_client": self.http_client_name,
            "request_factory": self.request_factory_name,
            "base_url": self.base_url,
            "logging": self.logging,
            "include_log_context": self.include_log_context,
        })
    }

    fn log(&self, level: Level, message: &str, mut fields: Fields) {
        if !self.logging {
            return;
        }

        let logger = match &self.logger {
            Some(logger) => logger,
            None => return,
        };

        if self.include_log_context {
            fields.insert("commander".into(), self.describe());
        }

        logger.log(level, message, &fields)
    }

    fn debug(&self, message: &str, fields: Fields) {
        self.log(Level::Debug, message, fields)
    }

    fn error(&self, message: &str, fields: Fields) {
        self.log(Level::Error, message, fields)
    }
}

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

fn error_fields(err: &dyn std::fmt::Display) -> Fields {
    fields(json!({ "error": err.to_string() }))
}
