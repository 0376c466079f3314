//! Fund State Fetching
//!
//! Assembles a `FundState` snapshot from the ledger gateway. Each figure is
//! read independently so one failed read degrades a single field instead of
//! the whole snapshot; callers decide when to re-fetch.

use coffer_core::{Identity, LedgerError, MinorUnits};
use ledger_client::LedgerClient;

use crate::state::FundState;

/// Fetch a fresh fund snapshot.
///
/// The caller balance is only queried when an identity is connected. Failed
/// reads are logged and reported as absent fields.
pub async fn fetch_fund_state(client: &LedgerClient, caller: Option<&Identity>) -> FundState {
    let (supply, treasury, contributed, caller_balance) = futures::join!(
        client.total_supply(),
        client.treasury_balance(),
        client.total_contributed(),
        async {
            match caller {
                Some(identity) => Some(client.balance_of(identity).await),
                None => None,
            }
        },
    );

    FundState {
        total_supply: ok_or_warn(supply, "totalSupply"),
        treasury_balance: ok_or_warn(treasury, "treasuryBalance"),
        total_contributed: ok_or_warn(contributed, "totalContributed"),
        caller_balance: caller_balance.and_then(|r| ok_or_warn(r, "callerBalance")),
    }
}

fn ok_or_warn(
    result: Result<MinorUnits, LedgerError>,
    field: &'static str,
) -> Option<MinorUnits> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", field, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_core::LedgerConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LedgerClient {
        LedgerClient::new(LedgerConfig {
            url: server.uri(),
            api_key: String::new(),
        })
        .unwrap()
    }

    async fn mount_amount(server: &MockServer, endpoint: &str, field: &str, value: &str) {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ field: value })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_full_snapshot() {
        let server = MockServer::start().await;
        mount_amount(&server, "/fund/total-supply", "totalSupply", "3000").await;
        mount_amount(&server, "/fund/treasury-balance", "treasuryBalance", "7").await;
        mount_amount(&server, "/fund/total-contributed", "totalContributed", "3").await;
        mount_amount(
            &server,
            "/fund/balance/0xaa00000000000000000000000000000000000001",
            "balance",
            "100",
        )
        .await;

        let client = client_for(&server);
        let caller = Identity::new("0xaa00000000000000000000000000000000000001");
        let state = fetch_fund_state(&client, Some(&caller)).await;

        assert_eq!(state.total_supply, Some(3000));
        assert_eq!(state.treasury_balance, Some(7));
        assert_eq!(state.total_contributed, Some(3));
        assert_eq!(state.caller_balance, Some(100));
    }

    #[tokio::test]
    async fn test_partial_availability_degrades_one_field() {
        let server = MockServer::start().await;
        mount_amount(&server, "/fund/total-supply", "totalSupply", "3000").await;
        mount_amount(&server, "/fund/total-contributed", "totalContributed", "3").await;
        // treasury endpoint is broken
        Mock::given(method("GET"))
            .and(path("/fund/treasury-balance"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let state = fetch_fund_state(&client, None).await;

        assert_eq!(state.total_supply, Some(3000));
        assert_eq!(state.treasury_balance, None);
        assert_eq!(state.total_contributed, Some(3));
        assert_eq!(state.caller_balance, None);
    }

    #[tokio::test]
    async fn test_no_caller_skips_balance_read() {
        let server = MockServer::start().await;
        mount_amount(&server, "/fund/total-supply", "totalSupply", "0").await;
        mount_amount(&server, "/fund/treasury-balance", "treasuryBalance", "0").await;
        mount_amount(&server, "/fund/total-contributed", "totalContributed", "0").await;

        let client = client_for(&server);
        let state = fetch_fund_state(&client, None).await;
        assert_eq!(state.caller_balance, None);
        assert_eq!(state.total_supply, Some(0));
    }
}
