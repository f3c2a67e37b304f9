use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// UDP endpoint on which the agent receives controller datagrams.
///
/// Written as `udp://host:port`. Serialises to and from that string so the
/// same form works in configuration files, environment variables and flags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct ServiceEndpoint {
    host: String,
    port: u16,
}

impl ServiceEndpoint {
    /// Builds an endpoint from a host name or address and a port.
    #[must_use]
    pub fn udp(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// UDP port; `0` asks the OS for an ephemeral port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Resolves the endpoint to the first socket address it names.
    pub fn resolve(&self) -> Result<SocketAddr, EndpointResolveError> {
        let mut addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|source| EndpointResolveError::Lookup {
                endpoint: self.to_string(),
                source,
            })?;
        addrs.next().ok_or_else(|| EndpointResolveError::Empty {
            endpoint: self.to_string(),
        })
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(formatter, "udp://[{}]:{}", self.host, self.port)
        } else {
            write!(formatter, "udp://{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for ServiceEndpoint {
    type Err = EndpointParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let url = Url::parse(input)?;
        if url.scheme() != "udp" {
            return Err(EndpointParseError::UnsupportedScheme(url.scheme().to_owned()));
        }
        let host = url
            .host_str()
            .ok_or_else(|| EndpointParseError::MissingHost(input.to_owned()))?;
        let port = url
            .port()
            .ok_or_else(|| EndpointParseError::MissingPort(input.to_owned()))?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        Ok(Self::udp(host, port))
    }
}

impl TryFrom<String> for ServiceEndpoint {
    type Error = EndpointParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ServiceEndpoint> for String {
    fn from(endpoint: ServiceEndpoint) -> Self {
        endpoint.to_string()
    }
}

/// Errors encountered while parsing a [`ServiceEndpoint`] from text.
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// Scheme was not `udp`.
    #[error("unsupported endpoint scheme '{0}'")]
    UnsupportedScheme(String),
    /// Host was missing.
    #[error("missing host in '{0}'")]
    MissingHost(String),
    /// Port was missing from the address.
    #[error("missing port in '{0}'")]
    MissingPort(String),
    /// URL failed to parse.
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

/// Errors raised when an endpoint does not resolve to a socket address.
#[derive(Debug, Error)]
pub enum EndpointResolveError {
    /// Name resolution failed.
    #[error("failed to resolve {endpoint}: {source}")]
    Lookup {
        /// Endpoint being resolved.
        endpoint: String,
        /// Underlying resolver error.
        #[source]
        source: std::io::Error,
    },
    /// Resolution succeeded but produced no addresses.
    #[error("no addresses resolved for {endpoint}")]
    Empty {
        /// Endpoint being resolved.
        endpoint: String,
    },
}
