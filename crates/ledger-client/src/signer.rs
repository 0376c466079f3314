//! Wallet signer client
//!
//! The signer service holds the user's keys: it reports the currently
//! connected identity and turns a ledger call into a signed, submitted
//! transaction. A refusal here is immediate and synchronous; no pending
//! operation exists until the signer has accepted the call.

use std::time::Duration;

use coffer_core::{Identity, SignerConfig, SubmitError, TxId};
use serde::{Deserialize, Serialize};

/// Signer calls should fail fast; the user is waiting on the result.
const SIGNER_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Result type for signer operations
pub type Result<T> = std::result::Result<T, SubmitError>;

/// Connection state reported by the signer service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub connected: bool,
    #[serde(default)]
    pub identity: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitAccepted {
    tx_id: String,
}

#[derive(Debug, Deserialize)]
struct SubmitRefused {
    error: String,
}

/// Client for the wallet signer service
#[derive(Clone)]
pub struct SignerClient {
    http: reqwest::Client,
    config: SignerConfig,
}

impl SignerClient {
    pub fn new(config: SignerConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(SIGNER_REQUEST_TIMEOUT)
            .build()
            .map_err(|e| SubmitError::ConnectorUnavailable {
                reason: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self { http, config })
    }

    /// Query the signer's session state
    pub async fn session(&self) -> Result<SessionInfo> {
        let url = format!("{}/session", self.config.url.trim_end_matches('/'));

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| SubmitError::ConnectorUnavailable {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SubmitError::ConnectorUnavailable {
                reason: format!("signer returned {}", response.status().as_u16()),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SubmitError::ConnectorUnavailable {
                reason: format!("bad session response: {}", e),
            })
    }

    /// Currently connected identity, if any
    pub async fn current_identity(&self) -> Result<Option<Identity>> {
        let session = self.session().await?;
        if !session.connected {
            return Ok(None);
        }
        Ok(session.identity.map(Identity::new))
    }

    /// Sign and submit a ledger call.
    ///
    /// Returns the transaction id once the signed call has been handed to the
    /// ledger. A 4xx/5xx from the signer (user rejected, no wallet, bad call)
    /// surfaces as `SubmitError::Rejected` with the signer's reason.
    pub async fn sign_and_submit(&self, call: &serde_json::Value) -> Result<TxId> {
        let url = format!("{}/submit", self.config.url.trim_end_matches('/'));

        let response = self
            .http
            .post(&url)
            .json(call)
            .send()
            .await
            .map_err(|e| SubmitError::ConnectorUnavailable {
                reason: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            let accepted: SubmitAccepted =
                response
                    .json()
                    .await
                    .map_err(|e| SubmitError::ConnectorUnavailable {
                        reason: format!("bad submit response: {}", e),
                    })?;
            return Ok(TxId::new(accepted.tx_id));
        }

        let reason = response
            .json::<SubmitRefused>()
            .await
            .map(|r| r.error)
            .unwrap_or_else(|_| format!("signer returned {}", status.as_u16()));

        tracing::info!("Signer refused call: {}", reason);
        Err(SubmitError::Rejected { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> SignerClient {
        SignerClient::new(SignerConfig { url: server.uri() }).unwrap()
    }

    #[tokio::test]
    async fn test_session_connected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "connected": true,
                "identity": "0x7d0262f9dc4f014cbbffe8c6efdb2de509856aa4"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let identity = client.current_identity().await.unwrap();
        assert_eq!(
            identity.unwrap().as_str(),
            "0x7d0262f9dc4f014cbbffe8c6efdb2de509856aa4"
        );
    }

    #[tokio::test]
    async fn test_session_disconnected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/session"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"connected": false})))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.current_identity().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_and_submit_accepted() {
        let server = MockServer::start().await;
        let call = json!({"call": "invest", "value": "1500000000000000000"});

        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(body_json(call.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"txId": "0xfeed"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let tx_id = client.sign_and_submit(&call).await.unwrap();
        assert_eq!(tx_id.as_str(), "0xfeed");
    }

    #[tokio::test]
    async fn test_sign_and_submit_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/submit"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "user rejected"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .sign_and_submit(&json!({"call": "invest", "value": "1"}))
            .await
            .unwrap_err();
        match err {
            SubmitError::Rejected { reason } => assert_eq!(reason, "user rejected"),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_signer_unreachable() {
        let client = SignerClient::new(SignerConfig {
            url: "http://127.0.0.1:1".to_string(),
        })
        .unwrap();

        assert!(matches!(
            client.session().await,
            Err(SubmitError::ConnectorUnavailable { .. })
        ));
    }
}
