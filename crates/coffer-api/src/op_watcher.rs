//! Background operation watcher
//!
//! Tracks each submitted mutating call from Pending to a terminal state by
//! polling the ledger gateway, refreshing the fund snapshot when a call
//! confirms. At most one operation per kind may be pending at a time; the
//! frontend keeps the triggering control disabled while one is in flight.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use coffer_core::{LedgerError, TxId};
use ledger_client::TxStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::AppState;

/// How often the background task polls the gateway (seconds).
const POLL_INTERVAL_SECS: u64 = 10;

/// Operations older than this are resolved as failed (seconds).
const TIMEOUT_SECS: u64 = 40 * 60; // 40 minutes

// ─── Types ───────────────────────────────────────────────────────────────────

/// The logical action an operation performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpKind {
    Invest,
    Withdraw,
    MintManual,
}

impl OpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Invest => "invest",
            Self::Withdraw => "withdraw",
            Self::MintManual => "mintManual",
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An operation of this kind is already awaiting confirmation
#[derive(Debug, Error, PartialEq, Eq)]
#[error("A {kind} operation is already pending")]
pub struct OpInFlight {
    pub kind: OpKind,
}

struct PendingOp {
    id: String,
    kind: OpKind,
    tx_id: TxId,
    description: String,
    submitted_at: Instant,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PendingOpInfo {
    pub id: String,
    pub kind: OpKind,
    pub tx_id: String,
    pub description: String,
    pub elapsed_secs: u64,
}

/// Terminal outcome of an operation, handed to the frontend exactly once
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct OpResolution {
    pub id: String,
    pub kind: OpKind,
    /// "confirmed" | "failed"
    pub status: String,
    /// Failure reason when status is "failed"
    pub reason: Option<String>,
    pub tx_id: String,
    pub description: String,
    pub timestamp: u64,
}

// ─── OpWatcher ───────────────────────────────────────────────────────────────

struct OpWatcher {
    items: Vec<PendingOp>,
    resolved: Vec<OpResolution>,
}

impl OpWatcher {
    fn new() -> Self {
        Self {
            items: Vec::new(),
            resolved: Vec::new(),
        }
    }

    /// Register a freshly submitted operation. Refuses a second operation of
    /// the same kind while one is pending: resubmission is not idempotent at
    /// the ledger, so the duplicate must never leave this process.
    fn track(
        &mut self,
        kind: OpKind,
        tx_id: TxId,
        description: String,
    ) -> Result<String, OpInFlight> {
        if self.items.iter().any(|item| item.kind == kind) {
            return Err(OpInFlight { kind });
        }

        let id = uuid::Uuid::new_v4().to_string();
        self.items.push(PendingOp {
            id: id.clone(),
            kind,
            tx_id,
            description,
            submitted_at: Instant::now(),
        });
        Ok(id)
    }

    fn is_pending(&self, kind: OpKind) -> bool {
        self.items.iter().any(|item| item.kind == kind)
    }

    fn pending_items(&self) -> Vec<PendingOpInfo> {
        self.items
            .iter()
            .map(|item| PendingOpInfo {
                id: item.id.clone(),
                kind: item.kind,
                tx_id: item.tx_id.to_string(),
                description: item.description.clone(),
                elapsed_secs: item.submitted_at.elapsed().as_secs(),
            })
            .collect()
    }

    fn take_resolved(&mut self) -> Vec<OpResolution> {
        std::mem::take(&mut self.resolved)
    }

    async fn poll(&mut self, state: &AppState) {
        let client = match state.ledger_client().await {
            Some(c) => c,
            None => return,
        };

        let mut resolutions: Vec<OpResolution> = Vec::new();

        for item in &self.items {
            if item.submitted_at.elapsed().as_secs() > TIMEOUT_SECS {
                resolutions.push(make_resolution(
                    item,
                    "failed",
                    Some("not confirmed in time".to_string()),
                ));
                continue;
            }

            match client.tx_status(&item.tx_id).await {
                Ok(TxStatus::Confirmed) => {
                    tracing::info!("{} confirmed ({})", item.description, item.tx_id);
                    resolutions.push(make_resolution(item, "confirmed", None));
                }
                Ok(TxStatus::Failed { reason }) => {
                    tracing::info!(
                        "{} failed ({}): {}",
                        item.description,
                        item.tx_id,
                        reason
                    );
                    resolutions.push(make_resolution(item, "failed", Some(reason)));
                }
                Ok(TxStatus::Pending) => {}
                // Gateway has not indexed the tx yet; keep waiting until timeout
                Err(LedgerError::TxNotFound { .. }) => {}
                Err(e) => {
                    tracing::warn!("Status check for {} failed: {}", item.tx_id, e);
                }
            }
        }

        if resolutions.is_empty() {
            return;
        }

        let resolved_ids: Vec<String> = resolutions.iter().map(|r| r.id.clone()).collect();
        self.items.retain(|item| !resolved_ids.contains(&item.id));

        // A confirmed mutation invalidates the current snapshot
        if resolutions.iter().any(|r| r.status == "confirmed") {
            state.refresh_fund_snapshot().await;
        }

        self.resolved.extend(resolutions);
    }
}

fn make_resolution(item: &PendingOp, status: &str, reason: Option<String>) -> OpResolution {
    OpResolution {
        id: item.id.clone(),
        kind: item.kind,
        status: status.to_string(),
        reason,
        tx_id: item.tx_id.to_string(),
        description: item.description.clone(),
        timestamp: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs(),
    }
}

// ─── Managed state ───────────────────────────────────────────────────────────

pub struct OpWatcherState {
    watcher: tokio::sync::Mutex<OpWatcher>,
    polling: Arc<AtomicBool>,
}

impl Default for OpWatcherState {
    fn default() -> Self {
        Self {
            watcher: tokio::sync::Mutex::new(OpWatcher::new()),
            polling: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl OpWatcherState {
    pub fn new() -> Self {
        Self::default()
    }
}

fn ensure_poll_loop(state: &AppState) {
    let watcher_state = state.watcher();
    if watcher_state.polling.swap(true, Ordering::SeqCst) {
        return; // Already running
    }

    let polling = watcher_state.polling.clone();
    let state = state.clone();

    tokio::spawn(async move {
        loop {
            tokio::time::sleep(std::time::Duration::from_secs(POLL_INTERVAL_SECS)).await;

            let mut watcher = state.watcher().watcher.lock().await;
            if watcher.items.is_empty() {
                drop(watcher);
                polling.store(false, Ordering::SeqCst);
                break;
            }
            watcher.poll(&state).await;
        }

        tracing::debug!("Operation poll loop stopped (no items)");
    });
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Register a submitted operation and make sure the poll loop is running.
pub async fn track_op(
    state: &AppState,
    kind: OpKind,
    tx_id: TxId,
    description: String,
) -> Result<String, OpInFlight> {
    let id = {
        let mut watcher = state.watcher().watcher.lock().await;
        watcher.track(kind, tx_id, description)?
    };
    ensure_poll_loop(state);
    Ok(id)
}

/// Whether an operation of this kind is awaiting confirmation.
pub async fn is_pending(state: &AppState, kind: OpKind) -> bool {
    state.watcher().watcher.lock().await.is_pending(kind)
}

/// Operations currently awaiting confirmation.
pub async fn pending_ops(state: &AppState) -> Vec<PendingOpInfo> {
    state.watcher().watcher.lock().await.pending_items()
}

/// Terminal outcomes not yet observed by the frontend. Consuming: each
/// resolution is returned once and then discarded.
pub async fn take_resolutions(state: &AppState) -> Vec<OpResolution> {
    state.watcher().watcher.lock().await.take_resolved()
}

/// Drive one poll cycle immediately instead of waiting for the interval.
pub async fn poll_once(state: &AppState) {
    let mut watcher = state.watcher().watcher.lock().await;
    watcher.poll(state).await;
}
