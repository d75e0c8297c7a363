// API client module: a small blocking HTTP client for the Mailtrap
// sandbox send endpoint. One request per run; an optional single retry.

use crate::config::{Config, Credentials};
use crate::error::{DeliveryError, FatalError};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const SENDER_NAME: &str = "Mailtrap Test";
pub const CATEGORY: &str = "Integration Test";

/// Client holding a reqwest blocking client, the base URL of the API and
/// the credentials every request is sent with.
pub struct MailtrapClient {
    client: Client,
    base_url: String,
    credentials: Credentials,
    retry_once: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Sender {
    pub email: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Recipient {
    pub email: String,
}

/// Body of `POST /api/send/<inbox id>`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SendRequest {
    pub from: Sender,
    pub to: Vec<Recipient>,
    pub subject: String,
    pub html: String,
    pub category: String,
}

impl SendRequest {
    pub fn new(from: &str, to: &str, subject: String, html: String) -> Self {
        SendRequest {
            from: Sender {
                email: from.to_string(),
                name: SENDER_NAME.into(),
            },
            to: vec![Recipient { email: to.to_string() }],
            subject,
            html,
            category: CATEGORY.into(),
        }
    }
}

impl MailtrapClient {
    /// Build a client for the given credentials. Timeout and retry come
    /// from `config`; with neither set a request waits as long as it takes
    /// and is attempted once.
    pub fn new(credentials: Credentials, config: &Config) -> Result<Self, FatalError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FatalError::HttpClient)?;
        Ok(MailtrapClient {
            client,
            base_url: config.api_base_url.clone(),
            credentials,
            retry_once: config.retry_once,
        })
    }

    pub fn send_url(&self) -> String {
        format!("{}/api/send/{}", self.base_url, self.credentials.inbox_id)
    }

    fn headers(&self) -> Result<HeaderMap, FatalError> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", self.credentials.api_token);
        let value = HeaderValue::from_str(&bearer).map_err(|_| FatalError::InvalidConfig {
            name: "MAILTRAP_API_TOKEN",
            value: "<redacted>".into(),
        })?;
        headers.insert(AUTHORIZATION, value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Send the message. Returns the parsed JSON response on success.
    ///
    /// The outer `Result` is fatal (the request could not even be formed);
    /// the inner one is the delivery outcome.
    pub fn send(
        &self,
        req: &SendRequest,
    ) -> Result<Result<serde_json::Value, DeliveryError>, FatalError> {
        let headers = self.headers()?;
        let url = self.send_url();

        let first = self.attempt(&url, &headers, req);
        match first {
            Err(err) if self.retry_once && err.is_retryable() => {
                warn!(error = %err, "send failed, retrying once");
                Ok(self.attempt(&url, &headers, req))
            }
            outcome => Ok(outcome),
        }
    }

    fn attempt(
        &self,
        url: &str,
        headers: &HeaderMap,
        req: &SendRequest,
    ) -> Result<serde_json::Value, DeliveryError> {
        debug!(%url, subject = %req.subject, "posting to mailtrap");
        let res = self
            .client
            .post(url)
            .headers(headers.clone())
            .json(req)
            .send()
            .map_err(DeliveryError::Transport)?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().unwrap_or_default();
            return Err(DeliveryError::Api { status, body });
        }
        res.json().map_err(DeliveryError::InvalidResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client_for(server: &mockito::ServerGuard, retry_once: bool) -> MailtrapClient {
        let config = Config {
            api_base_url: server.url(),
            retry_once,
            ..Config::default()
        };
        let credentials = Credentials {
            api_token: "tok".into(),
            inbox_id: "42".into(),
        };
        MailtrapClient::new(credentials, &config).unwrap()
    }

    fn request() -> SendRequest {
        SendRequest::new(
            "me@example.com",
            "you@example.com",
            "Email Test: promo.html - 2024-03-05 09:07:03".into(),
            "<h1>Promo</h1>".into(),
        )
    }

    #[test]
    fn request_serializes_to_mailtrap_shape() {
        let value = serde_json::to_value(request()).unwrap();
        assert_eq!(
            value,
            json!({
                "from": { "email": "me@example.com", "name": "Mailtrap Test" },
                "to": [{ "email": "you@example.com" }],
                "subject": "Email Test: promo.html - 2024-03-05 09:07:03",
                "html": "<h1>Promo</h1>",
                "category": "Integration Test"
            })
        );
    }

    #[test]
    fn default_url_targets_sandbox_inbox() {
        let credentials = Credentials {
            api_token: "tok".into(),
            inbox_id: "1234".into(),
        };
        let client = MailtrapClient::new(credentials, &Config::default()).unwrap();
        assert_eq!(
            client.send_url(),
            "https://sandbox.api.mailtrap.io/api/send/1234"
        );
    }

    #[test]
    fn success_returns_parsed_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/send/42")
            .match_header("authorization", "Bearer tok")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::to_value(request()).unwrap()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true}"#)
            .create();

        let outcome = client_for(&server, false).send(&request()).unwrap();
        assert_eq!(outcome.unwrap(), json!({ "success": true }));
        mock.assert();
    }

    #[test]
    fn rejected_request_reports_status_and_body() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/send/42")
            .with_status(422)
            .with_body(r#"{"errors":["invalid"]}"#)
            .expect(1)
            .create();

        // 4xx is never retried, even with retry enabled.
        let err = client_for(&server, true)
            .send(&request())
            .unwrap()
            .unwrap_err();
        match err {
            DeliveryError::Api { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, r#"{"errors":["invalid"]}"#);
            }
            other => panic!("unexpected error: {other}"),
        }
        mock.assert();
    }

    #[test]
    fn server_error_is_attempted_once_without_retry() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/send/42")
            .with_status(503)
            .expect(1)
            .create();

        let outcome = client_for(&server, false).send(&request()).unwrap();
        assert!(matches!(outcome, Err(DeliveryError::Api { status: 503, .. })));
        mock.assert();
    }

    #[test]
    fn server_error_is_retried_once_when_enabled() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/api/send/42")
            .with_status(503)
            .expect(2)
            .create();

        let outcome = client_for(&server, true).send(&request()).unwrap();
        assert!(matches!(outcome, Err(DeliveryError::Api { status: 503, .. })));
        mock.assert();
    }

    #[test]
    fn connection_failure_is_retried_and_reported_as_transport() {
        // Bind then drop a listener to get a port nothing listens on.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let config = Config {
            api_base_url: format!("http://127.0.0.1:{port}"),
            retry_once: true,
            ..Config::default()
        };
        let credentials = Credentials {
            api_token: "tok".into(),
            inbox_id: "42".into(),
        };

        let outcome = MailtrapClient::new(credentials, &config)
            .unwrap()
            .send(&request())
            .unwrap();
        match outcome {
            Err(err @ DeliveryError::Transport(_)) => assert!(err.is_retryable()),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn non_json_success_body_is_a_delivery_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/api/send/42")
            .with_status(200)
            .with_body("ok")
            .create();

        let outcome = client_for(&server, false).send(&request()).unwrap();
        assert!(matches!(outcome, Err(DeliveryError::InvalidResponse(_))));
    }
}
