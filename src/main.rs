mod config;
mod store;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::debug;
use simplelog::{ColorChoice, TermLogger, TerminalMode};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use trellofeed_core::create_calendar_from_feed;
use trellofeed_trello::TrelloClient;

#[derive(Parser)]
#[command(name = "trellofeed")]
#[command(about = "Turn Trello boards with due-dated cards into iCalendar feeds")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the boards visible to the configured credential
    Boards,
    /// Manage calendar feeds
    #[command(subcommand)]
    Feed(FeedCommands),
    /// Render a feed's iCalendar document by its secret url token
    Render {
        /// The feed's secret url token
        token: String,

        /// Write the document to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum FeedCommands {
    /// Create a feed tracking one or more boards
    New {
        /// Board id to track (repeat for several boards)
        #[arg(long = "board", required = true)]
        boards: Vec<String>,

        /// Only include cards assigned to you
        #[arg(long)]
        only_assigned: bool,

        /// Render every card as a fixed 24-hour block
        #[arg(long)]
        all_day: bool,

        /// Event length in minutes (ignored with --all-day)
        #[arg(long, default_value_t = 60)]
        length: i64,
    },
    /// List stored feeds
    List,
    /// Track another board on an existing feed
    AddBoard {
        /// The feed's secret url token
        token: String,
        /// Id of the board to add
        board_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // Logs go to stderr: stdout must stay clean for the rendered calendar.
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialize logging")?;

    match cli.command {
        Commands::Boards => cmd_boards().await,
        Commands::Feed(FeedCommands::New {
            boards,
            only_assigned,
            all_day,
            length,
        }) => cmd_feed_new(boards, only_assigned, all_day, length).await,
        Commands::Feed(FeedCommands::List) => cmd_feed_list(),
        Commands::Feed(FeedCommands::AddBoard { token, board_id }) => {
            cmd_feed_add_board(&token, &board_id).await
        }
        Commands::Render { token, output } => cmd_render(&token, output.as_deref()).await,
    }
}

fn make_client() -> Result<TrelloClient> {
    let cfg = config::load_config()?;
    Ok(TrelloClient::new(cfg.trello.api_key, cfg.trello.token))
}

async fn cmd_boards() -> Result<()> {
    let client = make_client()?;
    let boards = client.boards().await?;

    if boards.is_empty() {
        println!("No boards visible to this credential.");
        return Ok(());
    }

    for board in boards {
        println!("{}  {}", board.id, board.name);
    }

    Ok(())
}

async fn cmd_feed_new(
    requested: Vec<String>,
    only_assigned: bool,
    all_day: bool,
    length: i64,
) -> Result<()> {
    if !all_day && length <= 0 {
        anyhow::bail!("--length must be a positive number of minutes");
    }

    let client = make_client()?;
    let member = client.member().await?;
    let boards = client.boards().await?;

    let mut tracked = HashSet::new();
    for id in &requested {
        let board = boards.iter().find(|b| &b.id == id).with_context(|| {
            format!(
                "Board '{}' is not visible to this credential.\n\
                Run `trellofeed boards` to see the available ids.",
                id
            )
        })?;
        println!("Tracking: {} ({})", board.name, board.id);
        tracked.insert(board.id.clone());
    }

    let now = Utc::now();
    let mut store = store::load_store()?;
    let user = store.get_or_create_user(&member.id, &member.username, now);
    let record = store.create_feed(&user, tracked, only_assigned, all_day, length, now);
    store::save_store(&store)?;

    println!();
    println!("Feed created for {}. Render it with:", user.user_name);
    println!("  trellofeed render {}", record.feed.url);

    Ok(())
}

fn cmd_feed_list() -> Result<()> {
    let store = store::load_store()?;

    if store.feeds.is_empty() {
        println!("No feeds yet. Create one with `trellofeed feed new --board <id>`.");
        return Ok(());
    }

    for record in &store.feeds {
        let feed = &record.feed;
        let mode = if feed.is_all_day_event {
            "all-day".to_string()
        } else {
            format!("{} min", feed.event_length)
        };
        println!(
            "{}  {} board(s), {}{}  last access {}",
            feed.url,
            feed.board_ids.len(),
            mode,
            if feed.only_assigned {
                ", assigned-only"
            } else {
                ""
            },
            record.last_access.format("%Y-%m-%d %H:%M"),
        );
    }

    Ok(())
}

async fn cmd_feed_add_board(token: &str, board_id: &str) -> Result<()> {
    let client = make_client()?;
    let boards = client.boards().await?;
    let board = boards.iter().find(|b| b.id == board_id).with_context(|| {
        format!(
            "Board '{}' is not visible to this credential.\n\
            Run `trellofeed boards` to see the available ids.",
            board_id
        )
    })?;

    let mut store = store::load_store()?;
    let record = store
        .find_feed_mut(token)
        .context("No feed with that url token")?;

    if !record.feed.board_ids.insert(board.id.clone()) {
        println!("Feed already tracks {} ({})", board.name, board.id);
        return Ok(());
    }

    let name = board.name.clone();
    store::save_store(&store)?;

    println!("Feed now tracks {} ({})", name, board_id);

    Ok(())
}

async fn cmd_render(token: &str, output: Option<&Path>) -> Result<()> {
    let mut store = store::load_store()?;
    let feed = {
        let record = store
            .find_feed_mut(token)
            .context("No feed with that url token")?;
        record.last_access = Utc::now();
        record.feed.clone()
    };
    store::save_store(&store)?;

    let client = make_client()?;
    debug!("rendering feed for member {}", feed.member_id);

    let calendar = create_calendar_from_feed(&client, &feed).await?;
    let ics = calendar.to_ics();

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Wrote {} event(s) to {}", calendar.events.len(), path.display());
        }
        // The raw text/calendar body, ready to be served or piped.
        None => print!("{ics}"),
    }

    Ok(())
}
