//! Database layer (managed Postgres behind PostgREST).

pub mod query;
pub mod supabase;

pub use query::TableQuery;
pub use supabase::{Session, SupabaseClient, TableRequest};

/// Table names as constants.
pub mod tables {
    pub const PROFILES: &str = "profiles";
    pub const BRANDS: &str = "brands";
    pub const PURCHASES: &str = "purchases";
    pub const TRANSACTIONS: &str = "transactions";
    pub const REPORTS: &str = "reports";
    pub const POLLS: &str = "polls";
    pub const POLL_OPTIONS: &str = "poll_options";
    pub const POLL_VOTES: &str = "poll_votes";
    pub const COIN_PACKAGES: &str = "coin_packages";
    pub const APP_SETTINGS: &str = "app_settings";
    pub const INVESTORS: &str = "investors";
    pub const INVESTOR_LEVELS: &str = "investor_levels";
    pub const INVESTMENTS: &str = "investments";
    pub const ACTIVITY_LOGS: &str = "activity_logs";
    pub const INTERESTS: &str = "interests";
    pub const INDUSTRIES: &str = "industries";
    pub const ACHIEVEMENT_DEFINITIONS: &str = "achievement_definitions";
}

/// Stored procedures invoked through `/rest/v1/rpc/<name>`.
pub mod procedures {
    pub const FINALIZE_PURCHASE: &str = "finalize_purchase";
    pub const REJECT_PURCHASE: &str = "reject_purchase";
    pub const APPROVE_CASHOUT: &str = "approve_cashout";
    pub const REJECT_CASHOUT: &str = "reject_cashout";
    pub const RESOLVE_REPORT: &str = "resolve_report";

    pub const GET_ALL_BLOG_POSTS: &str = "get_all_blog_posts";
    pub const GET_BLOG_POST_FOR_AGENT: &str = "get_blog_post_for_agent";
    pub const CREATE_BLOG_POST: &str = "create_blog_post";
    pub const UPDATE_BLOG_POST: &str = "update_blog_post";
    pub const DELETE_BLOG_POST: &str = "delete_blog_post";
    pub const PUBLISH_BLOG_POST: &str = "publish_blog_post";
    pub const UNPUBLISH_BLOG_POST: &str = "unpublish_blog_post";

    pub const GET_ALL_POLLS: &str = "get_all_polls";
    pub const CREATE_POLL: &str = "create_poll";
    pub const CLOSE_POLL: &str = "close_poll";
    pub const DELETE_POLL: &str = "delete_poll";

    pub const CREATE_INVESTOR_LEVEL: &str = "create_investor_level";
    pub const UPDATE_INVESTOR_LEVEL: &str = "update_investor_level";
    pub const DELETE_INVESTOR_LEVEL: &str = "delete_investor_level";
    pub const CREATE_INVESTMENT: &str = "create_investment_enhanced";
    pub const SET_INVESTOR_PROFIT_SHARE: &str = "set_investor_profit_share";

    pub const ANALYZE_PROFITABILITY: &str = "analyze_gamification_profitability";
}
