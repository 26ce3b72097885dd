//! RPC client for a ledger gateway.
//!
//! This module provides a real implementation of `GameLedger` that talks to
//! a gateway in front of the game contract via JSON-RPC 2.0.

use super::traits::{GameLedger, LedgerError, TxHandle};
use crate::games::Choice;
use crate::protocol::{Address, GameRecord, RawGameRecord};
use crate::view::ActiveGame;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Active game as the gateway returns it
#[derive(Debug, Deserialize)]
struct RawActiveGame {
    address: Address,
    record: RawGameRecord,
}

/// RPC client for the ledger gateway
pub struct RpcLedger {
    /// HTTP client
    client: Client,
    /// Gateway RPC URL
    rpc_url: String,
}

impl RpcLedger {
    /// Create a new RPC client
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            rpc_url: rpc_url.into(),
        }
    }

    /// Make a JSON-RPC call and return its `result`
    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params
        });

        // never log params: commit and reveal carry the password
        debug!(method, "ledger rpc request");

        let response = self
            .client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))?;

        let result: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::Network(e.to_string()))?;

        debug!(method, response = %result, "ledger rpc response");

        if let Some(error) = result.get("error") {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error");
            return Err(LedgerError::Rejected(msg.to_string()));
        }

        result
            .get("result")
            .cloned()
            .ok_or_else(|| LedgerError::Decode("No result in response".to_string()))
    }

    /// Submit a write and read back its transaction hash
    async fn send(&self, method: &str, params: Value) -> Result<TxHandle, LedgerError> {
        let result = self.call(method, json!([params])).await?;
        result
            .as_str()
            .map(TxHandle::new)
            .ok_or_else(|| LedgerError::Decode(format!("{} did not return a tx hash", method)))
    }
}

/// Decode the `rps_getActiveGame` result
fn decode_active_game(result: Value) -> Result<Option<ActiveGame>, LedgerError> {
    if result.is_null() {
        return Ok(None);
    }
    let raw: RawActiveGame =
        serde_json::from_value(result).map_err(|e| LedgerError::Decode(e.to_string()))?;
    let record = GameRecord::try_from(raw.record)?;
    Ok(Some(ActiveGame {
        address: raw.address,
        record,
    }))
}

#[async_trait]
impl GameLedger for RpcLedger {
    async fn active_game(&self, viewer: &Address) -> Result<Option<ActiveGame>, LedgerError> {
        let result = self
            .call("rps_getActiveGame", json!([viewer.to_string()]))
            .await?;
        decode_active_game(result)
    }

    async fn create_game(
        &self,
        viewer: &Address,
        opponent: &Address,
    ) -> Result<TxHandle, LedgerError> {
        let params = json!({
            "from": viewer.to_string(),
            "opponent": opponent.to_string(),
        });
        self.send("rps_createGame", params).await
    }

    async fn join_game(&self, viewer: &Address, game: &Address) -> Result<TxHandle, LedgerError> {
        let params = json!({
            "from": viewer.to_string(),
            "game": game.to_string(),
        });
        self.send("rps_joinGame", params).await
    }

    async fn commit(
        &self,
        viewer: &Address,
        choice: Choice,
        password: &str,
    ) -> Result<TxHandle, LedgerError> {
        let params = json!({
            "from": viewer.to_string(),
            "choice": choice.as_str(),
            "password": password,
        });
        self.send("rps_commit", params).await
    }

    async fn reveal(&self, viewer: &Address, password: &str) -> Result<TxHandle, LedgerError> {
        let params = json!({
            "from": viewer.to_string(),
            "password": password,
        });
        self.send("rps_reveal", params).await
    }

    async fn claim_default_win(&self, viewer: &Address) -> Result<TxHandle, LedgerError> {
        let params = json!({ "from": viewer.to_string() });
        self.send("rps_claimDefaultWin", params).await
    }

    async fn leave_game(&self, viewer: &Address) -> Result<TxHandle, LedgerError> {
        let params = json!({ "from": viewer.to_string() });
        self.send("rps_leaveGame", params).await
    }
}
