//! Nexusggr commands

use clap::Subcommand;
use ggr_client::{
    CallPage, CallType, DateRange, GatewayResult, NexusggrClient, TransactionKind, TurnoverQuery,
};
use serde_json::{Map, Value};

use super::parse_key_val;

#[derive(Debug, Subcommand)]
pub enum NexusCommand {
    /// Balance of one user, or of the agent and every user
    Info {
        /// User code (omit for all users)
        user: Option<String>,
    },

    /// Create a user
    Register {
        /// User code
        user: String,
    },

    /// Deposit to or withdraw from a user
    Transaction {
        /// User code
        user: String,

        /// deposit or withdraw
        kind: TransactionKind,

        /// Amount
        amount: i64,

        /// Unique ID used to reject duplicate transfers
        #[arg(long)]
        unique_id: Option<String>,
    },

    /// Withdraw the whole balance of a user, or of every user
    ResetBalance {
        /// User code (omit for all users)
        user: Option<String>,
    },

    /// Check a transfer made with a unique ID
    TransferStatus {
        /// User code
        user: String,

        /// Unique ID used for the transfer
        unique_id: String,
    },

    /// Launch a game
    Launch {
        /// User code
        user: String,

        /// Provider code
        provider: String,

        /// Game code
        game: String,

        /// Language code
        #[arg(long)]
        lang: Option<String>,

        /// Additional parameter as key=value (repeatable)
        #[arg(long = "param", value_parser = parse_key_val)]
        params: Vec<(String, Value)>,
    },

    /// List game providers
    Providers,

    /// List games of a provider
    Games {
        /// Provider code
        provider: String,
    },

    /// Game turnover history
    Turnovers {
        /// User code
        user: String,

        /// Game type (slot, live, ...)
        #[arg(long, default_value = "slot")]
        game_type: String,

        /// Start date (YYYY-MM-DD HH:MM:SS), defaults to one month ago
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD HH:MM:SS), defaults to tomorrow
        #[arg(long)]
        end: Option<String>,

        /// Page number
        #[arg(long, default_value_t = 0)]
        page: u32,

        /// Records per page
        #[arg(long, default_value_t = 1000)]
        per_page: u32,
    },

    /// Players currently in game
    Players,

    /// Scatter calls available for a game
    CallList {
        /// Provider code
        provider: String,

        /// Game code
        game: String,
    },

    /// Apply a scatter call for a user
    CallApply {
        /// User code
        user: String,

        /// Provider code
        provider: String,

        /// Game code
        game: String,

        /// Call RTP
        rtp: u32,

        /// Call type: 1 (common free) or 2 (buy bonus free)
        #[arg(long, default_value = "1")]
        call_type: CallType,
    },

    /// Scatter call history
    CallHistory {
        #[arg(long, default_value_t = 0)]
        offset: u32,

        #[arg(long, default_value_t = 100)]
        limit: u32,
    },

    /// Cancel a scatter call
    CallCancel {
        /// Call ID
        call_id: i64,
    },

    /// Set the RTP of one user for a provider
    UserRtp {
        /// User code
        user: String,

        /// Provider code
        provider: String,

        /// RTP value
        rtp: u32,
    },

    /// Set the RTP of every user
    AllUsersRtp {
        /// RTP value
        rtp: u32,
    },
}

/// Execute a Nexusggr command
pub async fn run(client: &NexusggrClient, command: NexusCommand) -> GatewayResult {
    match command {
        NexusCommand::Info { user } => client.info(user.as_deref()).await,
        NexusCommand::Register { user } => client.register(&user).await,
        NexusCommand::Transaction {
            user,
            kind,
            amount,
            unique_id,
        } => {
            client
                .transaction(&user, kind, amount, unique_id.as_deref())
                .await
        }
        NexusCommand::ResetBalance { user } => client.reset_user_balance(user.as_deref()).await,
        NexusCommand::TransferStatus { user, unique_id } => {
            client.transfer_status(&user, &unique_id).await
        }
        NexusCommand::Launch {
            user,
            provider,
            game,
            lang,
            params,
        } => {
            let extra: Map<String, Value> = params.into_iter().collect();
            let extra = (!extra.is_empty()).then_some(&extra);
            client
                .launch_game(&user, &provider, &game, lang.as_deref(), extra)
                .await
        }
        NexusCommand::Providers => client.providers().await,
        NexusCommand::Games { provider } => client.games(&provider).await,
        NexusCommand::Turnovers {
            user,
            game_type,
            start,
            end,
            page,
            per_page,
        } => {
            let query = TurnoverQuery::new(user)
                .game_type(game_type)
                .range(DateRange::new(start, end))
                .page(page, per_page);
            client.turnovers(&query).await
        }
        NexusCommand::Players => client.current_players().await,
        NexusCommand::CallList { provider, game } => {
            client.call_scatter_list(&provider, &game).await
        }
        NexusCommand::CallApply {
            user,
            provider,
            game,
            rtp,
            call_type,
        } => {
            client
                .call_scatter_apply(&user, &provider, &game, rtp, call_type)
                .await
        }
        NexusCommand::CallHistory { offset, limit } => {
            client.call_history(CallPage::new(offset, limit)).await
        }
        NexusCommand::CallCancel { call_id } => client.cancel_call(call_id).await,
        NexusCommand::UserRtp {
            user,
            provider,
            rtp,
        } => client.control_user_rtp(&user, &provider, rtp).await,
        NexusCommand::AllUsersRtp { rtp } => client.control_all_users_rtp(rtp).await,
    }
}
