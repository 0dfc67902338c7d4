//! Telo API client
//!
//! The vendor method is the last path segment of the request URL and the
//! body only carries credentials and parameters:
//!
//! ```text
//! POST {endpoint}/user_create
//! {"agent_code": "...", "agent_token": "...", "user_code": "..."}
//! ```

use serde::Serialize;
use tracing::instrument;

use crate::client::Gateway;
use crate::config::{ClientConfig, ConfigSource, EnvConfig};
use crate::error::{GatewayResult, Result};
use crate::payload::NoParams;
use crate::transport::{Dialect, HttpTransport};
use crate::types::{
    CallHistoryQuery, CallType, ExchangeQuery, GameLogQuery, GameType, LaunchGame,
    DEFAULT_LANGUAGE,
};

// =============================================================================
// Wire parameters
// =============================================================================

#[derive(Serialize)]
struct GameLaunch<'a> {
    user_code: &'a str,
    provider_code: &'a str,
    game_code: &'a str,
    game_type: GameType,
    lang: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    deposit_amount: Option<i64>,
}

#[derive(Serialize)]
struct CreateUser<'a> {
    user_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    deposit_amount: Option<i64>,
}

#[derive(Serialize)]
struct Transfer<'a> {
    user_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
}

#[derive(Serialize)]
struct OptionalUser<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_code: Option<&'a str>,
}

#[derive(Serialize)]
struct ProviderList {
    game_type: GameType,
}

#[derive(Serialize)]
struct GameList<'a> {
    provider_code: &'a str,
    lang: &'a str,
}

#[derive(Serialize)]
struct DateLog<'a> {
    game_type: GameType,
    start: String,
    end: String,
    page: u32,
    length: u32,
    search: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_code: Option<&'a str>,
}

#[derive(Serialize)]
struct IdLog<'a> {
    game_type: GameType,
    last_history_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_code: Option<&'a str>,
}

#[derive(Serialize)]
struct ExchangeHistory<'a> {
    start: String,
    end: String,
    page: u32,
    length: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_code: Option<&'a str>,
}

#[derive(Serialize)]
struct LogDetail<'a> {
    provider_code: &'a str,
    round_id: &'a str,
}

#[derive(Serialize)]
struct CallList<'a> {
    provider_code: &'a str,
    game_code: &'a str,
    user_code: &'a str,
    call_type: CallType,
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
struct AgentRtp {
    agent_rtp: u32,
}

#[derive(Serialize)]
struct UserRtp<'a> {
    provider_code: &'a str,
    user_code: &'a str,
    user_rtp: u32,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the Telo aggregator API
#[derive(Debug, Clone)]
pub struct TeloClient {
    gateway: Gateway,
}

impl TeloClient {
    /// Create a client from resolved configuration
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            gateway: Gateway::new(Dialect::PathRouted, config)?,
        })
    }

    /// Create a client from any configuration source
    pub fn from_source(source: &impl ConfigSource) -> Result<Self> {
        Self::new(source.load())
    }

    /// Create a client from `TELO_*` variables
    pub fn from_env() -> Result<Self> {
        Self::from_source(&EnvConfig::telo())
    }

    /// Create a client over an existing transport
    pub fn with_transport(config: ClientConfig, transport: HttpTransport) -> Self {
        Self {
            gateway: Gateway::with_transport(Dialect::PathRouted, config, transport),
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
    ) -> &mut Self {
        self.gateway
            .set_config(ClientConfig::new(agent, token, endpoint));
        self
    }

    /// Call an arbitrary method path with credentials merged in
    pub async fn post<P: Serialize + ?Sized>(&self, method: &str, params: &P) -> GatewayResult {
        self.gateway.call(method, params).await
    }

    // =========================================================================
    // Games
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn launch_game(&self, request: &LaunchGame) -> GatewayResult {
        let params = GameLaunch {
            user_code: &request.user_code,
            provider_code: &request.provider_code,
            game_code: &request.game_code,
            game_type: request.game_type,
            lang: request.lang.as_deref().unwrap_or(DEFAULT_LANGUAGE),
            deposit_amount: request.deposit_amount,
        };
        self.gateway.call("game_launch", &params).await
    }

    #[instrument(skip(self))]
    pub async fn providers(&self, game_type: GameType) -> GatewayResult {
        self.gateway
            .call("provider_list", &ProviderList { game_type })
            .await
    }

    #[instrument(skip(self))]
    pub async fn games(&self, provider_code: &str, lang: Option<&str>) -> GatewayResult {
        let params = GameList {
            provider_code,
            lang: lang.unwrap_or(DEFAULT_LANGUAGE),
        };
        self.gateway.call("game_list", &params).await
    }

    #[instrument(skip(self))]
    pub async fn current_players(&self) -> GatewayResult {
        self.gateway.call("current_players", &NoParams {}).await
    }

    // =========================================================================
    // Users & Wallet
    // =========================================================================

    /// Create a user, optionally with an initial deposit
    #[instrument(skip(self))]
    pub async fn create_user(&self, user_code: &str, deposit_amount: Option<i64>) -> GatewayResult {
        let params = CreateUser {
            user_code,
            deposit_amount,
        };
        self.gateway.call("user_create", &params).await
    }

    #[instrument(skip(self))]
    pub async fn deposit(&self, user_code: &str, amount: i64) -> GatewayResult {
        let params = Transfer {
            user_code,
            amount: Some(amount),
        };
        self.gateway.call("user_deposit", &params).await
    }

    /// Withdraw `amount`, or the whole balance when `None`
    #[instrument(skip(self))]
    pub async fn withdraw(&self, user_code: &str, amount: Option<i64>) -> GatewayResult {
        let params = Transfer { user_code, amount };
        self.gateway.call("user_withdraw", &params).await
    }

    /// Withdraw the balance of every user
    #[instrument(skip(self))]
    pub async fn withdraw_all(&self) -> GatewayResult {
        self.gateway.call("user_withdraw_all", &NoParams {}).await
    }

    /// Agent information, or a single user's when `user_code` is given
    #[instrument(skip(self))]
    pub async fn info(&self, user_code: Option<&str>) -> GatewayResult {
        self.gateway
            .call("info", &OptionalUser { user_code })
            .await
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Game log by date range; missing dates default to the last month
    #[instrument(skip(self))]
    pub async fn game_log_by_date(&self, query: &GameLogQuery) -> GatewayResult {
        let range = query.range.resolve();
        let params = DateLog {
            game_type: query.game_type,
            start: range.start,
            end: range.end,
            page: query.page,
            length: query.length,
            search: &query.search,
            user_code: query.user_code.as_deref(),
        };
        self.gateway.call("get_date_log", &params).await
    }

    /// Game log entries after `last_history_id`
    #[instrument(skip(self))]
    pub async fn game_log_by_id(
        &self,
        last_history_id: i64,
        game_type: GameType,
        user_code: Option<&str>,
    ) -> GatewayResult {
        let params = IdLog {
            game_type,
            last_history_id,
            user_code,
        };
        self.gateway.call("get_id_log", &params).await
    }

    /// Payment history; missing dates default to the last month
    #[instrument(skip(self))]
    pub async fn exchange_history(&self, query: &ExchangeQuery) -> GatewayResult {
        let range = query.range.resolve();
        let params = ExchangeHistory {
            start: range.start,
            end: range.end,
            page: query.page,
            length: query.length,
            user_code: query.user_code.as_deref(),
        };
        self.gateway.call("get_exchange_history", &params).await
    }

    #[instrument(skip(self))]
    pub async fn log_detail(&self, provider_code: &str, round_id: &str) -> GatewayResult {
        let params = LogDetail {
            provider_code,
            round_id,
        };
        self.gateway.call("get_log_detail", &params).await
    }

    // =========================================================================
    // Scatter calls
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn call_list(
        &self,
        provider_code: &str,
        game_code: &str,
        user_code: &str,
        call_type: CallType,
    ) -> GatewayResult {
        let params = CallList {
            provider_code,
            game_code,
            user_code,
            call_type,
        };
        self.gateway.call("call_list", &params).await
    }

    #[instrument(skip(self))]
    pub async fn call_apply(
        &self,
        provider_code: &str,
        game_code: &str,
        user_code: &str,
        call_rtp: u32,
        call_type: CallType,
    ) -> GatewayResult {
        let params = CallApply {
            provider_code,
            game_code,
            user_code,
            call_rtp,
            call_type,
        };
        self.gateway.call("call_apply", &params).await
    }

    #[instrument(skip(self))]
    pub async fn call_history(&self, query: &CallHistoryQuery) -> GatewayResult {
        self.gateway.call("call_history", query).await
    }

    #[instrument(skip(self))]
    pub async fn call_cancel(&self, call_id: i64) -> GatewayResult {
        self.gateway.call("call_cancel", &CallId { call_id }).await
    }

    // =========================================================================
    // RTP control
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn set_agent_rtp(&self, rtp: u32) -> GatewayResult {
        self.gateway
            .call("agent_rtp", &AgentRtp { agent_rtp: rtp })
            .await
    }

    #[instrument(skip(self))]
    pub async fn set_user_rtp(&self, provider_code: &str, user_code: &str, rtp: u32) -> GatewayResult {
        let params = UserRtp {
            provider_code,
            user_code,
            user_rtp: rtp,
        };
        self.gateway.call("user_rtp", &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TELO_DEFAULT_ENDPOINT;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = TeloClient::new(ClientConfig::new("A", "T", TELO_DEFAULT_ENDPOINT));
        assert!(client.is_ok());
    }

    #[test]
    fn test_set_config_chains() {
        let mut client = TeloClient::new(ClientConfig::default()).unwrap();
        let endpoint = client
            .set_config("A", "T", "http://vendor.test/api/v2")
            .config()
            .endpoint
            .clone();
        assert_eq!(endpoint, "http://vendor.test/api/v2");
    }

    #[test]
    fn test_optional_user_omitted() {
        assert_eq!(
            serde_json::to_value(OptionalUser { user_code: None }).unwrap(),
            json!({})
        );
    }

    #[test]
    fn test_launch_params() {
        let params = GameLaunch {
            user_code: "player1",
            provider_code: "PRAGMATIC",
            game_code: "vs20doghouse",
            game_type: GameType::Slot,
            lang: DEFAULT_LANGUAGE,
            deposit_amount: None,
        };
        assert_eq!(
            serde_json::to_value(params).unwrap(),
            json!({
                "user_code": "player1",
                "provider_code": "PRAGMATIC",
                "game_code": "vs20doghouse",
                "game_type": "slot",
                "lang": "en"
            })
        );
    }
}
