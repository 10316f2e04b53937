use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use sporlkit::{cache::EntityKind, cli, config, error, types::PkceToken, utils};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Look up entities by id, uri or link
    Get(GetOptions),

    /// Search the catalog
    Search(SearchOptions),

    /// Print the Spotify code image url for a uri
    Code(CodeOptions),

    /// Show which entity kinds are cached
    Cache,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct GetOptions {
    /// Entity kind (album, artist, track, playlist, show, episode, user, category)
    #[clap(value_parser = utils::parse_entity_kind)]
    kind: EntityKind,

    /// One or more ids; repeated ids are served from the cache
    #[clap(required = true, num_args = 1..)]
    ids: Vec<String>,

    /// Always fetch, even when the entity is cached
    #[clap(long)]
    force: bool,

    /// Market (ISO 3166-1 alpha-2), defaults to SPORLKIT_MARKET
    #[clap(long)]
    market: Option<String>,

    /// List album tracks, playlist items or show episodes
    #[clap(long)]
    items: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    #[clap(value_parser = utils::parse_entity_kind)]
    kind: EntityKind,

    query: String,

    #[clap(long, default_value_t = 10)]
    limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CodeOptions {
    /// Spotify uri, e.g. spotify:track:6rqhFgbbKwnb9MLmUQDhG6
    uri: String,

    /// Background color as hex
    #[clap(long, default_value = utils::DEFAULT_CODE_COLOR)]
    color: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Get(opt) => cli::get(opt.kind, opt.ids, opt.force, opt.market, opt.items).await,
        Command::Search(opt) => cli::search(opt.kind, opt.query, opt.limit).await,
        Command::Code(opt) => cli::code(&opt.uri, &opt.color).await,
        Command::Cache => cli::cache().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
