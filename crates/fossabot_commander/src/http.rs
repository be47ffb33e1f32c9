//! The transport the [`Commander`](crate::Commander) talks to fossabot through.
//!
//! Bring your own by implementing [`HttpClient`] and [`RequestFactory`], or use
//! [`AttoHttpClient`] and [`DefaultRequestFactory`].
use std::collections::BTreeMap;

use attohttpc::header::HeaderName;

/// Sends a request, blocking until there is a response.
///
/// A non-2xx status is a response, not an error. Errors are for when there is
/// no response at all.
pub trait HttpClient: Send + Sync {
    fn send(&self, request: Request) -> anyhow::Result<Response>;
}

/// Builds the requests sent by an [`HttpClient`].
pub trait RequestFactory: Send + Sync {
    fn create_get_request(&self, url: &str) -> Request;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Box<str>,
    url: Box<str>,
    headers: Headers,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".into(),
            url: url.into().into_boxed_str(),
            headers: Headers::default(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub const fn headers(&self) -> &Headers {
        &self.headers
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Headers,
    body: String,
}

impl Response {
    pub fn new(status: u16, headers: Headers, body: impl Into<String>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    pub const fn status(&self) -> u16 {
        self.status
    }

    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Header names are case-insensitive. A name may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(BTreeMap<String, Vec<String>>);

impl Headers {
    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.0
            .entry(name.to_ascii_lowercase())
            .or_default()
            .push(value.into())
    }

    /// The first value for this header
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).next()
    }

    pub fn get_all<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .get(&name.to_ascii_lowercase())
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0
            .iter()
            .flat_map(|(k, v)| v.iter().map(move |v| (k.as_str(), v.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> std::iter::FromIterator<(K, V)> for Headers
where
    K: AsRef<str>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), |mut headers, (k, v)| {
            headers.insert(k.as_ref(), v);
            headers
        })
    }
}

/// Asks for json and says who is asking.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRequestFactory;

impl DefaultRequestFactory {
    const USER_AGENT: &'static str = concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    );
}

impl RequestFactory for DefaultRequestFactory {
    fn create_get_request(&self, url: &str) -> Request {
        Request::get(url)
            .with_header("accept", "application/json")
            .with_header("user-agent", Self::USER_AGENT)
    }
}

/// A blocking client backed by attohttpc.
#[derive(Debug, Default, Clone)]
pub struct AttoHttpClient {
    timeout: Option<std::time::Duration>,
}

impl AttoHttpClient {
    pub const fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl HttpClient for AttoHttpClient {
    fn send(&self, request: Request) -> anyhow::Result<Response> {
        anyhow::ensure!(
            request.method().eq_ignore_ascii_case("GET"),
            "unsupported method: {}",
            request.method()
        );

        let mut builder = attohttpc::get(request.url());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        for (name, value) in request.headers().iter() {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            builder = builder.try_header(name, value)?;
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str(), v.to_string())))
            .collect();

        log::trace!("GET {} -> {}", request.url(), status);
        Ok(Response::new(status, headers, response.text()?))
    }
}
