//! Application state shared across API handlers

use std::sync::Arc;
use std::time::Instant;

use coffer_core::{AppConfig, Identity, LedgerConfig};
use fund::FundState;
use ledger_client::{LedgerClient, SignerClient};
use thiserror::Error;
use tokio::sync::RwLock;

use crate::op_watcher::OpWatcherState;

/// Errors that can occur in the session layer
#[derive(Debug, Error)]
pub enum SessionError {
    /// Identity string does not match the expected wire format
    #[error("Invalid identity: {reason}")]
    InvalidIdentity { reason: String },
}

/// State representing a connected identity.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// The connected identity, 0x-prefixed hex as supplied by the connector
    pub identity: Identity,
    /// When the identity was connected
    pub connected_at: Instant,
}

impl SessionState {
    pub fn new(identity: Identity) -> Self {
        Self {
            identity,
            connected_at: Instant::now(),
        }
    }
}

/// Validate that an identity has the expected wire format: "0x" followed by
/// exactly 40 hex characters. Case is not checked; identities arrive in
/// whatever case the connector produces.
fn validate_identity(identity: &str) -> Result<(), SessionError> {
    let body = identity
        .strip_prefix("0x")
        .ok_or_else(|| SessionError::InvalidIdentity {
            reason: "Identity must start with '0x'".to_string(),
        })?;

    if body.len() != 40 {
        return Err(SessionError::InvalidIdentity {
            reason: format!("Identity must be 42 characters, got {}", identity.len()),
        });
    }

    if hex::decode(body).is_err() {
        return Err(SessionError::InvalidIdentity {
            reason: "Identity contains non-hex characters".to_string(),
        });
    }

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: RwLock<AppConfig>,
    ledger_client: RwLock<Option<LedgerClient>>,
    signer_client: RwLock<Option<SignerClient>>,
    session: RwLock<Option<SessionState>>,
    fund_snapshot: RwLock<Option<FundState>>,
    watcher: OpWatcherState,
}

impl AppState {
    /// Create a new application state with default config
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create with a specific config
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config: RwLock::new(config),
                ledger_client: RwLock::new(None),
                signer_client: RwLock::new(None),
                session: RwLock::new(None),
                fund_snapshot: RwLock::new(None),
                watcher: OpWatcherState::new(),
            }),
        }
    }

    /// Get current config
    pub async fn config(&self) -> AppConfig {
        self.inner.config.read().await.clone()
    }

    /// Update the ledger gateway configuration
    pub async fn set_ledger_config(&self, ledger: LedgerConfig) {
        let mut config = self.inner.config.write().await;
        config.ledger = ledger;

        // Clear cached client
        let mut client = self.inner.ledger_client.write().await;
        *client = None;
    }

    /// Get or create the ledger gateway client
    pub async fn ledger_client(&self) -> Option<LedgerClient> {
        {
            let client = self.inner.ledger_client.read().await;
            if client.is_some() {
                return client.clone();
            }
        }

        let config = self.inner.config.read().await;
        match LedgerClient::new(config.ledger.clone()) {
            Ok(client) => {
                tracing::info!("Created ledger client for {}", config.ledger.url);
                let mut cached = self.inner.ledger_client.write().await;
                *cached = Some(client.clone());
                Some(client)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to create ledger client for {}: {}",
                    config.ledger.url,
                    e
                );
                None
            }
        }
    }

    /// Get or create the wallet signer client
    pub async fn signer_client(&self) -> Option<SignerClient> {
        {
            let client = self.inner.signer_client.read().await;
            if client.is_some() {
                return client.clone();
            }
        }

        let config = self.inner.config.read().await;
        match SignerClient::new(config.signer.clone()) {
            Ok(client) => {
                let mut cached = self.inner.signer_client.write().await;
                *cached = Some(client.clone());
                Some(client)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to create signer client for {}: {}",
                    config.signer.url,
                    e
                );
                None
            }
        }
    }

    /// Get current session state
    pub async fn session(&self) -> Option<SessionState> {
        self.inner.session.read().await.clone()
    }

    /// Connect an identity with format validation.
    ///
    /// # Errors
    /// Returns `SessionError::InvalidIdentity` if the format is invalid.
    pub async fn connect(&self, identity: String) -> Result<(), SessionError> {
        validate_identity(&identity)?;
        let mut session = self.inner.session.write().await;
        *session = Some(SessionState::new(Identity::new(identity)));
        Ok(())
    }

    /// Disconnect (clear session state)
    pub async fn disconnect(&self) {
        let mut session = self.inner.session.write().await;
        *session = None;
    }

    /// Last fetched fund snapshot, if any
    pub async fn fund_snapshot(&self) -> Option<FundState> {
        *self.inner.fund_snapshot.read().await
    }

    /// Fetch a fresh fund snapshot for the current session and cache it.
    pub async fn refresh_fund_snapshot(&self) -> Option<FundState> {
        let client = self.ledger_client().await?;
        let session = self.session().await;
        let snapshot =
            fund::fetch_fund_state(&client, session.as_ref().map(|s| &s.identity)).await;

        let mut cached = self.inner.fund_snapshot.write().await;
        *cached = Some(snapshot);
        Some(snapshot)
    }

    /// Operation watcher state
    pub(crate) fn watcher(&self) -> &OpWatcherState {
        &self.inner.watcher
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
