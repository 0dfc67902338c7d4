//! Nexusggr API client
//!
//! Every request goes to the single configured endpoint with the vendor
//! method carried in the body:
//!
//! ```text
//! POST {endpoint}
//! {"method": "user_create", "agent_code": "...", "agent_token": "...", "user_code": "..."}
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::client::Gateway;
use crate::config::{ClientConfig, ConfigSource, EnvConfig};
use crate::error::{GatewayError, GatewayResult, Result};
use crate::payload::NoParams;
use crate::transport::{Dialect, HttpTransport};
use crate::types::{CallPage, CallType, TransactionKind, TurnoverQuery, DEFAULT_LANGUAGE};

/// Key of the user collection in a `money_info` response
pub const USER_LIST_KEY: &str = "user_list";

// =============================================================================
// Wire parameters
// =============================================================================

#[derive(Serialize)]
#[serde(untagged)]
enum UserScope<'a> {
    One { user_code: &'a str },
    All { all_users: bool },
}

impl<'a> UserScope<'a> {
    fn from_user(user_code: Option<&'a str>) -> Self {
        match user_code {
            Some(user_code) => Self::One { user_code },
            None => Self::All { all_users: true },
        }
    }
}

#[derive(Serialize)]
struct UserCode<'a> {
    user_code: &'a str,
}

#[derive(Serialize)]
struct Transaction<'a> {
    user_code: &'a str,
    amount: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    agent_sign: Option<&'a str>,
}

#[derive(Serialize)]
struct GameLaunch<'a> {
    user_code: &'a str,
    provider_code: &'a str,
    game_code: &'a str,
    lang: &'a str,
}

#[derive(Serialize)]
struct ProviderCode<'a> {
    provider_code: &'a str,
}

#[derive(Serialize)]
struct GameLog<'a> {
    user_code: &'a str,
    game_type: &'a str,
    start: String,
    end: String,
    page: u32,
    #[serde(rename = "perPage")]
    per_page: u32,
}

#[derive(Serialize)]
struct ProviderGame<'a> {
    provider_code: &'a str,
    game_code: &'a str,
}

#[derive(Serialize)]
struct CallApply<'a> {
    provider_code: &'a str,
    game_code: &'a str,
    user_code: &'a str,
    call_rtp: u32,
    call_type: CallType,
}

#[derive(Serialize)]
struct CallId {
    call_id: i64,
}

#[derive(Serialize)]
struct UserRtp<'a> {
    provider_code: &'a str,
    user_code: &'a str,
    rtp: u32,
}

#[derive(Serialize)]
struct UsersRtp {
    /// JSON-encoded array of user codes
    user_codes: String,
    rtp: u32,
}

#[derive(Serialize)]
struct TransferStatus<'a> {
    user_code: &'a str,
    agent_sign: &'a str,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the Nexusggr aggregator API
#[derive(Debug, Clone)]
pub struct NexusggrClient {
    gateway: Gateway,
}

impl NexusggrClient {
    /// Create a client from resolved configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::new(Dialect::MethodField, config)?,
        })
    }

    /// Create a client from any configuration source
    pub fn from_source(source: &impl ConfigSource) -> Result<Self> {
        Self::new(source.load())
    }

    /// Create a client from `.env` and `NEXUSGGR_*` variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(&EnvConfig::nexusggr().with_dotenv())
    }

    /// Create a client over an existing transport
    pub fn with_transport(config: ClientConfig, transport: HttpTransport) -> Self {
        Self {
            gateway: Gateway::with_transport(Dialect::MethodField, config, transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        self.gateway.config()
    }

    /// Replace agent, token and endpoint for subsequent calls
    pub fn set_config(
        &mut self,
        agent: impl Into<String>,
        token: impl Into<String>,
        endpoint: impl Into<String>,
    ) {
        self.gateway
            .set_config(ClientConfig::new(agent, token, endpoint));
    }

    /// Call an arbitrary vendor method with credentials merged in
    pub async fn post<P: Serialize + ?Sized>(&self, method: &str, params: &P) -> GatewayResult {
        self.gateway.call(method, params).await
    }

    // =========================================================================
    // Users & Wallet
    // =========================================================================

    /// Balance of one user, or of the agent and all users
    #[instrument(skip(self))]
    pub async fn info(&self, user_code: Option<&str>) -> GatewayResult {
        self.gateway
            .call("money_info", &UserScope::from_user(user_code))
            .await
    }

    /// Create a user
    #[instrument(skip(self))]
    pub async fn register(&self, user_code: &str) -> GatewayResult {
        self.gateway
            .call("user_create", &UserCode { user_code })
            .await
    }

    /// Deposit to or withdraw from a user.
    ///
    /// `unique_id` is forwarded as `agent_sign` so the vendor can reject
    /// duplicates; see [`NexusggrClient::transfer_status`].
    #[instrument(skip(self))]
    pub async fn transaction(
        &self,
        user_code: &str,
        kind: TransactionKind,
        amount: i64,
        unique_id: Option<&str>,
    ) -> GatewayResult {
        let params = Transaction {
            user_code,
            amount,
            agent_sign: unique_id,
        };
        self.gateway.call(&kind.method(), &params).await
    }

    /// Withdraw the whole balance of one user, or of every user
    #[instrument(skip(self))]
    pub async fn reset_user_balance(&self, user_code: Option<&str>) -> GatewayResult {
        self.gateway
            .call("user_withdraw_reset", &UserScope::from_user(user_code))
            .await
    }

    /// Status of a transfer made with `unique_id`
    #[instrument(skip(self))]
    pub async fn transfer_status(&self, user_code: &str, unique_id: &str) -> GatewayResult {
        let params = TransferStatus {
            user_code,
            agent_sign: unique_id,
        };
        self.gateway.call("transfer_status", &params).await
    }

    // =========================================================================
    // Games
    // =========================================================================

    /// Launch a game. `extra` overrides typed keys such as `lang`; credentials
    /// and `method` are never replaced.
    #[instrument(skip(self, extra))]
    pub async fn launch_game(
        &self,
        user_code: &str,
        provider_code: &str,
        game_code: &str,
        lang: Option<&str>,
        extra: Option<&Map<String, Value>>,
    ) -> GatewayResult {
        let params = GameLaunch {
            user_code,
            provider_code,
            game_code,
            lang: lang.unwrap_or(DEFAULT_LANGUAGE),
        };
        self.gateway
            .call_with_extra("game_launch", &params, extra)
            .await
    }

    #[instrument(skip(self))]
    pub async fn providers(&self) -> GatewayResult {
        self.gateway.call("provider_list", &NoParams {}).await
    }

    #[instrument(skip(self))]
    pub async fn games(&self, provider_code: &str) -> GatewayResult {
        self.gateway
            .call("game_list", &ProviderCode { provider_code })
            .await
    }

    /// Game turnover history; missing dates default to the last month
    #[instrument(skip(self))]
    pub async fn turnovers(&self, query: &TurnoverQuery) -> GatewayResult {
        let range = query.range.resolve();
        let params = GameLog {
            user_code: &query.user_code,
            game_type: &query.game_type,
            start: range.start,
            end: range.end,
            page: query.page,
            per_page: query.per_page,
        };
        self.gateway.call("get_game_log", &params).await
    }

    #[instrument(skip(self))]
    pub async fn current_players(&self) -> GatewayResult {
        self.gateway.call("call_players", &NoParams {}).await
    }

    // =========================================================================
    // Scatter calls
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn call_scatter_list(&self, provider_code: &str, game_code: &str) -> GatewayResult {
        let params = ProviderGame {
            provider_code,
            game_code,
        };
        self.gateway.call("call_list", &params).await
    }

    #[instrument(skip(self))]
    pub async fn call_scatter_apply(
        &self,
        user_code: &str,
        provider_code: &str,
        game_code: &str,
        rtp: u32,
        call_type: CallType,
    ) -> GatewayResult {
        let params = CallApply {
            provider_code,
            game_code,
            user_code,
            call_rtp: rtp,
            call_type,
        };
        self.gateway.call("call_apply", &params).await
    }

    /// Scatter call history; `CallPage::default()` is the first 100 calls
    #[instrument(skip(self))]
    pub async fn call_history(&self, page: CallPage) -> GatewayResult {
        self.gateway.call("call_history", &page).await
    }

    #[instrument(skip(self))]
    pub async fn cancel_call(&self, call_id: i64) -> GatewayResult {
        self.gateway.call("call_cancel", &CallId { call_id }).await
    }

    // =========================================================================
    // RTP control
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn control_user_rtp(
        &self,
        user_code: &str,
        provider_code: &str,
        rtp: u32,
    ) -> GatewayResult {
        let params = UserRtp {
            provider_code,
            user_code,
            rtp,
        };
        self.gateway.call("control_rtp", &params).await
    }

    /// Apply `rtp` to every user listed by [`NexusggrClient::info`].
    ///
    /// Returns [`GatewayError::NoUsers`] without a second request when the
    /// listing fails or holds no user codes.
    #[instrument(skip(self))]
    pub async fn control_all_users_rtp(&self, rtp: u32) -> GatewayResult {
        let info = self.info(None).await.map_err(|e| {
            warn!(error = %e, "User listing failed");
            GatewayError::NoUsers
        })?;
        let user_codes = extract_user_codes(&info, USER_LIST_KEY).ok_or(GatewayError::NoUsers)?;
        debug!(users = user_codes.len(), "Applying RTP to all users");

        let user_codes =
            serde_json::to_string(&user_codes).map_err(|e| GatewayError::Encode(e.to_string()))?;
        self.gateway
            .call("control_users_rtp", &UsersRtp { user_codes, rtp })
            .await
    }
}

/// User codes under `key`, in order; `None` when absent or empty
fn extract_user_codes(info: &Value, key: &str) -> Option<Vec<String>> {
    let users = info.get(key)?.as_array()?;
    let codes: Vec<String> = users
        .iter()
        .filter_map(|user| {
            let code = user.get("user_code").and_then(Value::as_str);
            if code.is_none() {
                warn!("Skipping {} entry without a user_code", key);
            }
            code.map(str::to_string)
        })
        .collect();

    if codes.is_empty() {
        None
    } else {
        Some(codes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = NexusggrClient::new(ClientConfig::new("A", "T", "http://vendor.test"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_set_config() {
        let mut client = NexusggrClient::new(ClientConfig::default()).unwrap();
        client.set_config("A", "T", "http://vendor.test");
        assert_eq!(
            client.config(),
            &ClientConfig::new("A", "T", "http://vendor.test")
        );
    }

    #[test]
    fn test_user_scope() {
        assert_eq!(
            serde_json::to_value(UserScope::from_user(Some("player1"))).unwrap(),
            json!({ "user_code": "player1" })
        );
        assert_eq!(
            serde_json::to_value(UserScope::from_user(None)).unwrap(),
            json!({ "all_users": true })
        );
    }

    #[test]
    fn test_extract_user_codes() {
        let info = json!({
            "status": 1,
            "user_list": [
                { "user_code": "alice", "balance": 10 },
                { "balance": 3 },
                { "user_code": "bob", "balance": 0 }
            ]
        });
        assert_eq!(
            extract_user_codes(&info, USER_LIST_KEY),
            Some(vec!["alice".to_string(), "bob".to_string()])
        );
    }

    #[test]
    fn test_extract_user_codes_missing_or_empty() {
        assert_eq!(extract_user_codes(&json!({ "status": 1 }), USER_LIST_KEY), None);
        assert_eq!(
            extract_user_codes(&json!({ "user_list": [] }), USER_LIST_KEY),
            None
        );
        assert_eq!(
            extract_user_codes(&json!({ "user_list": "none" }), USER_LIST_KEY),
            None
        );
    }

    #[test]
    fn test_game_log_field_names() {
        let params = GameLog {
            user_code: "player1",
            game_type: "slot",
            start: "2024-05-15 08:30:00".to_string(),
            end: "2024-06-16 08:30:00".to_string(),
            page: 0,
            per_page: 1000,
        };
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({
                "user_code": "player1",
                "game_type": "slot",
                "start": "2024-05-15 08:30:00",
                "end": "2024-06-16 08:30:00",
                "page": 0,
                "perPage": 1000
            })
        );
    }
}
