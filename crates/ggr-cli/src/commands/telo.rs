//! Telo commands

use clap::Subcommand;
use ggr_client::{
    CallHistoryQuery, CallType, DateRange, ExchangeQuery, GameLogQuery, GameType, GatewayResult,
    LaunchGame, OrderDir, TeloClient,
};

#[derive(Debug, Subcommand)]
pub enum TeloCommand {
    /// Launch a game
    Launch {
        /// User code
        user: String,

        /// Provider code
        provider: String,

        /// Game code
        game: String,

        /// slot or casino
        #[arg(long, default_value = "slot")]
        game_type: GameType,

        /// Language code
        #[arg(long)]
        lang: Option<String>,

        /// Amount to deposit before launching
        #[arg(long)]
        deposit: Option<i64>,
    },

    /// Create a user
    CreateUser {
        /// User code
        user: String,

        /// Initial deposit
        #[arg(long)]
        deposit: Option<i64>,
    },

    /// Deposit to a user
    Deposit {
        /// User code
        user: String,

        /// Amount
        amount: i64,
    },

    /// Withdraw from a user (whole balance when no amount is given)
    Withdraw {
        /// User code
        user: String,

        /// Amount
        amount: Option<i64>,
    },

    /// Withdraw the balance of every user
    WithdrawAll,

    /// Agent information, or a single user's
    Info {
        /// User code
        user: Option<String>,
    },

    /// List game providers
    Providers {
        /// slot or casino
        #[arg(long, default_value = "slot")]
        game_type: GameType,
    },

    /// List games of a provider
    Games {
        /// Provider code
        provider: String,

        /// Language code
        #[arg(long)]
        lang: Option<String>,
    },

    /// Game history by date range
    LogByDate {
        /// slot or casino
        #[arg(long, default_value = "slot")]
        game_type: GameType,

        /// User code
        #[arg(long)]
        user: Option<String>,

        /// Start date (YYYY-MM-DD HH:MM:SS), defaults to one month ago
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD HH:MM:SS), defaults to tomorrow
        #[arg(long)]
        end: Option<String>,

        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = 1000)]
        length: u32,

        /// Search term
        #[arg(long, default_value = "")]
        search: String,
    },

    /// Game history after a history ID
    LogById {
        /// Last history ID
        last_history_id: i64,

        /// slot or casino
        #[arg(long, default_value = "slot")]
        game_type: GameType,

        /// User code
        #[arg(long)]
        user: Option<String>,
    },

    /// Payment transaction history
    ExchangeHistory {
        /// User code
        #[arg(long)]
        user: Option<String>,

        /// Start date (YYYY-MM-DD HH:MM:SS), defaults to one month ago
        #[arg(long)]
        start: Option<String>,

        /// End date (YYYY-MM-DD HH:MM:SS), defaults to tomorrow
        #[arg(long)]
        end: Option<String>,

        #[arg(long, default_value_t = 0)]
        page: u32,

        #[arg(long, default_value_t = 1000)]
        length: u32,
    },

    /// Detailed log of a game round
    LogDetail {
        /// Provider code
        provider: String,

        /// Round ID
        round_id: String,
    },

    /// Players currently in game
    Players,

    /// Scatter calls available for a user in a game
    CallList {
        /// Provider code
        provider: String,

        /// Game code
        game: String,

        /// User code
        user: String,

        /// Call type: 1 (common free) or 2 (buy bonus free)
        #[arg(long, default_value = "1")]
        call_type: CallType,
    },

    /// Apply a scatter call
    CallApply {
        /// Provider code
        provider: String,

        /// Game code
        game: String,

        /// User code
        user: String,

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

        /// Only calls after this ID
        #[arg(long)]
        last_call_id: Option<i64>,

        /// ASC or DESC
        #[arg(long, default_value = "DESC")]
        order: OrderDir,
    },

    /// Cancel a scatter call
    CallCancel {
        /// Call ID
        call_id: i64,
    },

    /// Set the agent RTP
    AgentRtp {
        /// RTP value
        rtp: u32,
    },

    /// Set the RTP of one user for a provider
    UserRtp {
        /// Provider code
        provider: String,

        /// User code
        user: String,

        /// RTP value
        rtp: u32,
    },
}

/// Execute a Telo command
pub async fn run(client: &TeloClient, command: TeloCommand) -> GatewayResult {
    match command {
        TeloCommand::Launch {
            user,
            provider,
            game,
            game_type,
            lang,
            deposit,
        } => {
            let mut request = LaunchGame::new(user, provider, game).game_type(game_type);
            request.lang = lang;
            request.deposit_amount = deposit;
            client.launch_game(&request).await
        }
        TeloCommand::CreateUser { user, deposit } => client.create_user(&user, deposit).await,
        TeloCommand::Deposit { user, amount } => client.deposit(&user, amount).await,
        TeloCommand::Withdraw { user, amount } => client.withdraw(&user, amount).await,
        TeloCommand::WithdrawAll => client.withdraw_all().await,
        TeloCommand::Info { user } => client.info(user.as_deref()).await,
        TeloCommand::Providers { game_type } => client.providers(game_type).await,
        TeloCommand::Games { provider, lang } => client.games(&provider, lang.as_deref()).await,
        TeloCommand::LogByDate {
            game_type,
            user,
            start,
            end,
            page,
            length,
            search,
        } => {
            let mut query = GameLogQuery::default()
                .game_type(game_type)
                .range(DateRange::new(start, end))
                .page(page, length)
                .search(search);
            query.user_code = user;
            client.game_log_by_date(&query).await
        }
        TeloCommand::LogById {
            last_history_id,
            game_type,
            user,
        } => {
            client
                .game_log_by_id(last_history_id, game_type, user.as_deref())
                .await
        }
        TeloCommand::ExchangeHistory {
            user,
            start,
            end,
            page,
            length,
        } => {
            let mut query = ExchangeQuery::default()
                .range(DateRange::new(start, end))
                .page(page, length);
            query.user_code = user;
            client.exchange_history(&query).await
        }
        TeloCommand::LogDetail { provider, round_id } => {
            client.log_detail(&provider, &round_id).await
        }
        TeloCommand::Players => client.current_players().await,
        TeloCommand::CallList {
            provider,
            game,
            user,
            call_type,
        } => client.call_list(&provider, &game, &user, call_type).await,
        TeloCommand::CallApply {
            provider,
            game,
            user,
            rtp,
            call_type,
        } => {
            client
                .call_apply(&provider, &game, &user, rtp, call_type)
                .await
        }
        TeloCommand::CallHistory {
            offset,
            limit,
            last_call_id,
            order,
        } => {
            let mut query = CallHistoryQuery::default().page(offset, limit).order(order);
            query.last_call_id = last_call_id;
            client.call_history(&query).await
        }
        TeloCommand::CallCancel { call_id } => client.call_cancel(call_id).await,
        TeloCommand::AgentRtp { rtp } => client.set_agent_rtp(rtp).await,
        TeloCommand::UserRtp {
            provider,
            user,
            rtp,
        } => client.set_user_rtp(&provider, &user, rtp).await,
    }
}
