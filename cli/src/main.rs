//! Command line admin console for the livebet backend.

mod cli;
mod commands;
mod config;
mod context;
mod output;
mod render;
mod timing;

use anyhow::Result;
use clap::Parser as _;
use livebet_business::resources::{BalanceHistory, LiveStreams, Predicts, Transactions, Users};

use crate::cli::{Cli, Commands, ListArgs, LivestreamCommand, ResourceKind};
use crate::commands::{
    run_create, run_details, run_list, run_login, run_logout, run_result, run_status,
};
use crate::context::AppContext;

async fn list(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    match args.resource {
        ResourceKind::Users => run_list::<Users>(ctx, args).await.map(drop),
        ResourceKind::Transactions => run_list::<Transactions>(ctx, args).await.map(drop),
        ResourceKind::Predicts => run_list::<Predicts>(ctx, args).await.map(drop),
        ResourceKind::BalanceHistory => run_list::<BalanceHistory>(ctx, args).await.map(drop),
        ResourceKind::Livestreams => match run_list::<LiveStreams>(ctx, args).await? {
            Some(stream) => run_details(ctx, &stream).await,
            None => Ok(()),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    timing::init_tracing(cli.verbose, cli.timing);

    let mut ctx = AppContext::build(&cli)?;

    match cli.command {
        Commands::Login { username } => run_login(&mut ctx, username).await,
        Commands::Logout => run_logout(&mut ctx),
        Commands::Status => {
            run_status(&ctx);
            Ok(())
        }
        Commands::List(args) => list(&ctx, &args).await,
        Commands::Livestream(LivestreamCommand::Create {
            youtube_link,
            streamer,
            start,
            end,
        }) => run_create(&ctx, youtube_link, streamer, start, end).await,
        Commands::Livestream(LivestreamCommand::Result { id, outcome }) => {
            run_result(&ctx, id, outcome).await
        }
    }
}
