//! # Network Module
//!
//! This module provides networking abstractions over HTTP, which is how the simulation server
//! exposes the robot. Requests are blocking and each carries a timeout.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use std::time::Duration;
use log::trace;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

// Export ureq
pub use ureq;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Status expected in response to a query.
pub const STATUS_OK: u16 = 200;

/// Status expected in response to a demand.
pub const STATUS_NO_CONTENT: u16 = 204;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Network parameters
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NetParams {
    /// Endpoint of the simulation server, either `host:port` or a full `http://` URL.
    pub sim_endpoint: String,

    /// Timeout applied to each request in milliseconds.
    pub request_timeout_ms: u64
}

/// A blocking HTTP client bound to a single server.
///
/// Cloning the client is cheap and clones share the same connection pool.
#[derive(Clone)]
pub struct HttpClient {
    agent: ureq::Agent,

    base_url: String
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(thiserror::Error, Debug)]
pub enum NetError {
    #[error("Unexpected response from the server (status {0})")]
    UnexpectedResponse(u16),

    #[error("Could not reach the server: {0}")]
    Transport(Box<ureq::Transport>),

    #[error("Could not deserialize the response from the server: {0}")]
    DeserializeError(std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl HttpClient {
    /// Create a new client for the server given in the parameters.
    pub fn new(params: &NetParams) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_millis(params.request_timeout_ms))
            .build();

        Self {
            agent,
            base_url: base_url(&params.sim_endpoint)
        }
    }

    /// Return the full URL of the given resource on the server.
    pub fn url(&self, resource: &str) -> String {
        format!("{}{}", self.base_url, resource)
    }

    /// Get a resource from the server and deserialize its JSON body.
    ///
    /// Anything other than `200 OK` is an [`NetError::UnexpectedResponse`].
    pub fn get_json<T: DeserializeOwned>(&self, resource: &str) -> Result<T, NetError> {
        let url = self.url(resource);
        trace!("GET {}", url);

        let response = self.agent.get(&url)
            .set("Accept", "text/json")
            .call()?;

        if response.status() != STATUS_OK {
            return Err(NetError::UnexpectedResponse(response.status()))
        }

        response.into_json().map_err(NetError::DeserializeError)
    }

    /// Post a JSON body to a resource on the server.
    ///
    /// The server must acknowledge with `204 No Content`, any other status is an
    /// [`NetError::UnexpectedResponse`].
    pub fn post_json<T: Serialize>(&self, resource: &str, body: &T) -> Result<(), NetError> {
        let url = self.url(resource);
        trace!("POST {}", url);

        let response = self.agent.post(&url)
            .set("Accept", "text/json")
            .send_json(body)?;

        match response.status() {
            STATUS_NO_CONTENT => Ok(()),
            s => Err(NetError::UnexpectedResponse(s))
        }
    }
}

impl From<ureq::Error> for NetError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::Status(status, _) => NetError::UnexpectedResponse(status),
            ureq::Error::Transport(t) => NetError::Transport(Box::new(t))
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Build the base URL from an endpoint, adding the scheme if missing and removing any trailing
/// slash.
fn base_url(endpoint: &str) -> String {
    let url = if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    }
    else {
        format!("http://{}", endpoint)
    };

    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod test {
    use super::*;

    fn client(endpoint: &str) -> HttpClient {
        HttpClient::new(&NetParams {
            sim_endpoint: endpoint.into(),
            request_timeout_ms: 100
        })
    }

    #[test]
    fn test_url() {
        assert_eq!(
            client("localhost:50000").url("/lokarria/localization"),
            "http://localhost:50000/lokarria/localization"
        );
        assert_eq!(
            client("http://10.0.0.2:50000/").url("/lokarria/differentialdrive"),
            "http://10.0.0.2:50000/lokarria/differentialdrive"
        );
    }

    #[test]
    fn test_net_params() {
        let params: NetParams = serde_json::from_str(
            r#"{"sim_endpoint": "localhost:50000", "request_timeout_ms": 500}"#
        ).unwrap();

        assert_eq!(params.sim_endpoint, "localhost:50000");
        assert_eq!(params.request_timeout_ms, 500);
    }
}
