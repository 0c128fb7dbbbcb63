use clap::{Args, Parser, Subcommand, ValueEnum};
use livebet_business::resources::LiveStreamResult;
use livebet_business::{DEFAULT_LIMIT, DEFAULT_PAGE, Locale, SortOrder, filter_value, parse_sort};

#[derive(Parser)]
#[command(name = "livebet")]
#[command(about = "Admin console for the livebet backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend base URL, e.g. http://127.0.0.1:3001
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Language for labels and badges: en, vi
    #[arg(long, global = true)]
    pub locale: Option<Locale>,

    /// Show timing/latency information
    #[arg(long, global = true)]
    pub timing: bool,

    /// Enable verbose debug output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and save the session
    Login {
        #[arg(long, short = 'u')]
        username: Option<String>,
    },
    /// Forget the saved session
    Logout,
    /// Show who is signed in
    Status,
    /// List a resource as a table
    List(ListArgs),
    /// Manage livestreams
    #[command(subcommand)]
    Livestream(LivestreamCommand),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceKind {
    Users,
    Transactions,
    Predicts,
    BalanceHistory,
    Livestreams,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub resource: ResourceKind,

    #[arg(long, short = 'p', default_value_t = DEFAULT_PAGE)]
    pub page: u32,

    /// Rows per page
    #[arg(long, short = 'l', default_value_t = DEFAULT_LIMIT)]
    pub limit: u32,

    /// Sort as `field:asc` or `field:desc`
    #[arg(long, short = 's', value_parser = parse_sort)]
    pub sort: Option<(String, SortOrder)>,

    /// Filter as `key=value`; repeatable
    #[arg(long, short = 'f', value_parser = parse_filter)]
    pub filter: Vec<(String, serde_json::Value)>,

    /// Fetch once and page locally instead of asking the backend per page
    #[arg(long)]
    pub client_side: bool,

    /// Rows fetched in one request with --client-side
    #[arg(long, default_value_t = 100, requires = "client_side")]
    pub fetch_limit: u32,

    /// Pick a row to see its details
    #[arg(long, short = 'I')]
    pub interactive: bool,
}

#[derive(Debug, Subcommand)]
pub enum LivestreamCommand {
    /// Create a livestream; missing fields are prompted for
    Create {
        #[arg(long)]
        youtube_link: Option<String>,
        #[arg(long)]
        streamer: Option<String>,
        /// Start in Vietnam time, `YYYY-MM-DD HH:MM`
        #[arg(long)]
        start: Option<String>,
        /// End in Vietnam time, `YYYY-MM-DD HH:MM`
        #[arg(long)]
        end: Option<String>,
    },
    /// Record the result of a livestream
    Result {
        /// Numeric livestream id
        id: i64,
        #[arg(value_enum)]
        outcome: Outcome,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Outcome {
    Win,
    Lose,
}

impl From<Outcome> for LiveStreamResult {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Self::Win,
            Outcome::Lose => Self::Lose,
        }
    }
}

fn parse_filter(raw: &str) -> Result<(String, serde_json::Value), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_owned(), filter_value(value)))
        }
        _ => Err(format!("filter must look like `key=value`, got `{raw}`")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_list_arguments() {
        let cli = Cli::try_parse_from([
            "livebet",
            "list",
            "balance-history",
            "--page",
            "3",
            "--sort",
            "createdAt:asc",
            "-f",
            "type=win",
            "-f",
            "isPaid=true",
            "--locale",
            "vi",
        ])
        .unwrap();

        assert_eq!(cli.locale, Some(Locale::Vi));
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(args.resource, ResourceKind::BalanceHistory);
        assert_eq!(args.page, 3);
        assert_eq!(args.limit, DEFAULT_LIMIT);
        assert_eq!(args.sort, Some(("createdAt".to_owned(), SortOrder::Asc)));
        assert_eq!(
            args.filter,
            vec![
                ("type".to_owned(), serde_json::json!("win")),
                ("isPaid".to_owned(), serde_json::json!(true)),
            ]
        );
    }

    #[test]
    fn test_rejects_malformed_filter() {
        assert!(Cli::try_parse_from(["livebet", "list", "users", "-f", "oops"]).is_err());
        assert!(Cli::try_parse_from(["livebet", "list", "users", "--sort", "amount:up"]).is_err());
    }

    #[test]
    fn test_parse_livestream_result() {
        let cli = Cli::try_parse_from(["livebet", "livestream", "result", "17", "win"]).unwrap();
        let Commands::Livestream(LivestreamCommand::Result { id, outcome }) = cli.command else {
            panic!("expected livestream result");
        };
        assert_eq!(id, 17);
        assert_eq!(LiveStreamResult::from(outcome), LiveStreamResult::Win);
    }
}
