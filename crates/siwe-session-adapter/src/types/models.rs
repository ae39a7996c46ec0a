/*
[INPUT]:  Application page URL
[OUTPUT]: Domain and origin used in SIWE messages
[POS]:    Data layer - shared models
[UPDATE]: When message domain or URI derivation changes
*/

use url::Url;

use crate::http::{Result, SessionError};

/// Location of the page hosting the sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    url: Url,
}

impl PageLocation {
    pub fn parse(raw: &str) -> Result<Self> {
        let url = Url::parse(raw)?;
        Self::from_url(url)
    }

    pub fn from_url(url: Url) -> Result<Self> {
        if url.host_str().is_none() {
            return Err(SessionError::Config(format!(
                "page url has no host: {url}"
            )));
        }
        Ok(Self { url })
    }

    /// `host[:port]`, used as the message domain
    pub fn host(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// `scheme://host[:port]`, used as the message URI
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_location_with_port() {
        let location = PageLocation::parse("http://localhost:3000/dashboard?tab=1").unwrap();
        assert_eq!(location.host(), "localhost:3000");
        assert_eq!(location.origin(), "http://localhost:3000");
    }

    #[test]
    fn test_page_location_default_port_is_hidden() {
        let location = PageLocation::parse("https://app.example.com:443/").unwrap();
        assert_eq!(location.host(), "app.example.com");
        assert_eq!(location.origin(), "https://app.example.com");
    }

    #[test]
    fn test_page_location_requires_host() {
        let err = PageLocation::parse("data:text/plain,hello").unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }
}
