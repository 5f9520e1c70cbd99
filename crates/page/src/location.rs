use std::fmt;
use std::str::FromStr;

use url::{Host, Url};

use crate::PageError;

/// The page URL, with the accessors the sidebar needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    url: Url,
}

impl Location {
    pub fn parse(input: &str) -> Result<Self, PageError> {
        Url::parse(input)
            .map(|url| Self { url })
            .map_err(|source| PageError::InvalidLocation {
                url: input.to_string(),
                source,
            })
    }

    /// Host name without port; empty for URLs that have no host.
    pub fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    pub fn pathname(&self) -> &str {
        self.url.path()
    }

    /// Fragment including the leading `#`, or an empty string.
    pub fn hash(&self) -> String {
        match self.url.fragment() {
            Some(fragment) if !fragment.is_empty() => format!("#{fragment}"),
            _ => String::new(),
        }
    }

    /// True for `localhost` and loopback IP addresses.
    pub fn is_loopback(&self) -> bool {
        match self.url.host() {
            Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
            Some(Host::Ipv4(address)) => address.is_loopback(),
            Some(Host::Ipv6(address)) => address.is_loopback(),
            None => false,
        }
    }

    /// Resolves `href` against this location.
    pub fn join(&self, href: &str) -> Result<Self, PageError> {
        self.url
            .join(href)
            .map(|url| Self { url })
            .map_err(|source| PageError::InvalidLocation {
                url: href.to_string(),
                source,
            })
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }
}

impl Default for Location {
    fn default() -> Self {
        Self {
            url: Url::parse("about:blank").expect("about:blank is a valid URL"),
        }
    }
}

impl FromStr for Location {
    type Err = PageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
