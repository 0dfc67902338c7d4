//! Request parameter types shared by the vendor façades

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::dates::DateRange;

/// Language sent when the caller does not pick one
pub const DEFAULT_LANGUAGE: &str = "en";

/// Game type sent when the caller does not pick one
pub const DEFAULT_GAME_TYPE: &str = "slot";

// =============================================================================
// Wallet
// =============================================================================

/// Direction of a balance transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Deposit,
    Withdraw,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
        }
    }

    /// Vendor method name, e.g. `user_deposit`
    pub fn method(&self) -> String {
        format!("user_{}", self.as_str())
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "deposit" => Ok(Self::Deposit),
            "withdraw" => Ok(Self::Withdraw),
            _ => Err(format!(
                "Unknown transaction type: {} (expected deposit or withdraw)",
                s
            )),
        }
    }
}

// =============================================================================
// Scatter calls
// =============================================================================

/// Kind of scatter call; sent as its integer code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CallType {
    /// Common free spins (1)
    #[default]
    CommonFree,
    /// Buy-bonus free spins (2)
    BuyBonusFree,
}

impl CallType {
    pub fn code(&self) -> u8 {
        match self {
            Self::CommonFree => 1,
            Self::BuyBonusFree => 2,
        }
    }
}

impl Serialize for CallType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl TryFrom<u8> for CallType {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::CommonFree),
            2 => Ok(Self::BuyBonusFree),
            other => Err(format!("Unknown call type: {} (expected 1 or 2)", other)),
        }
    }
}

impl FromStr for CallType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code: u8 = s
            .parse()
            .map_err(|_| format!("Invalid call type: {} (expected 1 or 2)", s))?;
        Self::try_from(code)
    }
}

/// Sort direction for call history
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderDir {
    Asc,
    #[default]
    Desc,
}

impl FromStr for OrderDir {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(format!("Invalid order direction: {} (expected ASC or DESC)", s)),
        }
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Game category understood by the Telo API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    #[default]
    Slot,
    Casino,
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slot" => Ok(Self::Slot),
            "casino" => Ok(Self::Casino),
            _ => Err(format!("Invalid game type: {} (expected slot or casino)", s)),
        }
    }
}

// =============================================================================
// Nexusggr queries
// =============================================================================

/// Turnover (game log) query for the Nexusggr API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnoverQuery {
    pub user_code: String,
    /// Free-form game type (`slot`, `live`, ...)
    pub game_type: String,
    pub range: DateRange,
    pub page: u32,
    pub per_page: u32,
}

impl TurnoverQuery {
    pub fn new(user_code: impl Into<String>) -> Self {
        Self {
            user_code: user_code.into(),
            game_type: DEFAULT_GAME_TYPE.to_string(),
            range: DateRange::default(),
            page: 0,
            per_page: 1000,
        }
    }

    pub fn game_type(mut self, game_type: impl Into<String>) -> Self {
        self.game_type = game_type.into();
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn page(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }
}

// =============================================================================
// Telo queries
// =============================================================================

/// Game launch request for the Telo API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchGame {
    pub user_code: String,
    pub provider_code: String,
    pub game_code: String,
    pub game_type: GameType,
    /// Defaults to `en` when unset
    pub lang: Option<String>,
    pub deposit_amount: Option<i64>,
}

impl LaunchGame {
    pub fn new(
        user_code: impl Into<String>,
        provider_code: impl Into<String>,
        game_code: impl Into<String>,
    ) -> Self {
        Self {
            user_code: user_code.into(),
            provider_code: provider_code.into(),
            game_code: game_code.into(),
            game_type: GameType::default(),
            lang: None,
            deposit_amount: None,
        }
    }

    pub fn game_type(mut self, game_type: GameType) -> Self {
        self.game_type = game_type;
        self
    }

    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn deposit_amount(mut self, amount: i64) -> Self {
        self.deposit_amount = Some(amount);
        self
    }
}

/// Date-ranged game log query for the Telo API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameLogQuery {
    pub game_type: GameType,
    pub user_code: Option<String>,
    pub range: DateRange,
    pub page: u32,
    pub length: u32,
    pub search: String,
}

impl Default for GameLogQuery {
    fn default() -> Self {
        Self {
            game_type: GameType::default(),
            user_code: None,
            range: DateRange::default(),
            page: 0,
            length: 1000,
            search: String::new(),
        }
    }
}

impl GameLogQuery {
    pub fn user(mut self, user_code: impl Into<String>) -> Self {
        self.user_code = Some(user_code.into());
        self
    }

    pub fn game_type(mut self, game_type: GameType) -> Self {
        self.game_type = game_type;
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn page(mut self, page: u32, length: u32) -> Self {
        self.page = page;
        self.length = length;
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Payment (exchange) history query for the Telo API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeQuery {
    pub user_code: Option<String>,
    pub range: DateRange,
    pub page: u32,
    pub length: u32,
}

impl Default for ExchangeQuery {
    fn default() -> Self {
        Self {
            user_code: None,
            range: DateRange::default(),
            page: 0,
            length: 1000,
        }
    }
}

impl ExchangeQuery {
    pub fn user(mut self, user_code: impl Into<String>) -> Self {
        self.user_code = Some(user_code.into());
        self
    }

    pub fn range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    pub fn page(mut self, page: u32, length: u32) -> Self {
        self.page = page;
        self.length = length;
        self
    }
}

/// Call history page for the Nexusggr API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallPage {
    pub offset: u32,
    pub limit: u32,
}

impl Default for CallPage {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
        }
    }
}

impl CallPage {
    pub fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }
}

/// Call history page for the Telo API
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallHistoryQuery {
    pub offset: u32,
    pub limit: u32,
    pub order_dir: OrderDir,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_call_id: Option<i64>,
}

impl Default for CallHistoryQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 100,
            order_dir: OrderDir::default(),
            last_call_id: None,
        }
    }
}

impl CallHistoryQuery {
    pub fn page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    pub fn after(mut self, last_call_id: i64) -> Self {
        self.last_call_id = Some(last_call_id);
        self
    }

    pub fn order(mut self, order_dir: OrderDir) -> Self {
        self.order_dir = order_dir;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_method() {
        assert_eq!(TransactionKind::Deposit.method(), "user_deposit");
        assert_eq!(TransactionKind::Withdraw.method(), "user_withdraw");
        assert_eq!(
            "Deposit".parse::<TransactionKind>().unwrap(),
            TransactionKind::Deposit
        );
        assert!("refund".parse::<TransactionKind>().is_err());
    }

    #[test]
    fn test_call_page_default() {
        assert_eq!(
            serde_json::to_value(CallPage::default()).unwrap(),
            json!({ "offset": 0, "limit": 100 })
        );
    }

    #[test]
    fn test_call_type_codes() {
        assert_eq!(serde_json::to_value(CallType::CommonFree).unwrap(), json!(1));
        assert_eq!(serde_json::to_value(CallType::BuyBonusFree).unwrap(), json!(2));
        assert_eq!("2".parse::<CallType>().unwrap(), CallType::BuyBonusFree);
        assert!(CallType::try_from(3).is_err());
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(serde_json::to_value(OrderDir::Desc).unwrap(), json!("DESC"));
        assert_eq!(serde_json::to_value(GameType::Casino).unwrap(), json!("casino"));
        assert_eq!("asc".parse::<OrderDir>().unwrap(), OrderDir::Asc);
    }

    #[test]
    fn test_query_defaults() {
        let turnover = TurnoverQuery::new("player1");
        assert_eq!(turnover.game_type, "slot");
        assert_eq!((turnover.page, turnover.per_page), (0, 1000));

        let history = CallHistoryQuery::default();
        assert_eq!(
            serde_json::to_value(&history).unwrap(),
            json!({ "offset": 0, "limit": 100, "order_dir": "DESC" })
        );
    }
}
