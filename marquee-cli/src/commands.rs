//! CLI command implementations

use anyhow::{Context, bail};
use clap::Subcommand;
use marquee_core::{MarqueeConfig, RuntimeMode, SearchParams, SearchState};
use marquee_search::MovieSearchService;
use marquee_web::{SearchView, SessionSnapshot, run_server, spawn_search_session};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render;

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Server {
        /// Host to bind to (overrides MARQUEE_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to (overrides MARQUEE_PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Data source: production (TMDB) or development (demo catalogue)
        #[arg(long, default_value = "development")]
        mode: RuntimeMode,
    },
    /// Print one page of search results
    Search {
        /// Movie title to search for
        text: String,
        /// Page to show
        #[arg(short, long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "development")]
        mode: RuntimeMode,
    },
    /// Print the detail record of one movie
    Detail {
        /// Movie id
        id: u64,
        #[arg(long, default_value = "development")]
        mode: RuntimeMode,
    },
    /// Search as you type: each stdin line is the new search text
    Interactive {
        #[arg(long, default_value = "development")]
        mode: RuntimeMode,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the error of the command that fails
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Server { host, port, mode } => start_server(host, port, mode).await,
        Commands::Search { text, page, mode } => search(text, page, mode).await,
        Commands::Detail { id, mode } => detail(id, mode).await,
        Commands::Interactive { mode } => interactive(mode).await,
    }
}

fn load_config() -> anyhow::Result<MarqueeConfig> {
    let config = MarqueeConfig::from_env();
    config.validate()?;
    Ok(config)
}

fn build_service(mode: RuntimeMode, config: &MarqueeConfig) -> anyhow::Result<MovieSearchService> {
    MovieSearchService::from_runtime_mode(mode, config)
        .with_context(|| format!("Failed to set up movie search in {mode} mode"))
}

async fn start_server(host: Option<String>, port: Option<u16>, mode: RuntimeMode) -> anyhow::Result<()> {
    let mut config = load_config()?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    println!("Marquee running on http://{}", config.server.bind_address());
    run_server(config, mode).await?;
    Ok(())
}

async fn search(text: String, page: u32, mode: RuntimeMode) -> anyhow::Result<()> {
    let config = load_config()?;
    let service = build_service(mode, &config)?;

    let state = SearchState::new(text, page);
    let mut view = SearchView::from_params(SearchParams::from(&state));
    if let Some(key) = view.query_key() {
        let result = service.search(view.debounced_search(), view.page()).await;
        view.apply_result(&key, result);
    }

    let content = view.content()?;
    println!("{}", render::view_content(&content));
    Ok(())
}

async fn detail(id: u64, mode: RuntimeMode) -> anyhow::Result<()> {
    let config = load_config()?;
    let service = build_service(mode, &config)?;

    let detail = service.movie_detail(id).await?;
    println!("{}", render::movie_detail(&detail));
    Ok(())
}

/// Reads search text line by line and prints every view the session renders.
///
/// `:page N` switches page, `:quit` (or end of input) exits.
async fn interactive(mode: RuntimeMode) -> anyhow::Result<()> {
    let config = load_config()?;
    let service = build_service(mode, &config)?;
    let session = spawn_search_session(service, &config.search, SearchParams::default());
    tracing::info!(%mode, "Interactive search session started");

    let mut snapshots = session.subscribe();
    let printer = tokio::spawn(async move {
        let mut last_printed = String::new();
        loop {
            let rendered = format_snapshot(&snapshots.borrow_and_update().clone());
            if rendered != last_printed {
                println!("{rendered}");
                last_printed = rendered;
            }
            if snapshots.changed().await.is_err() {
                break;
            }
        }
    });

    println!("Type a movie title. `:page N` changes page, `:quit` exits.");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_line(&line) {
            Ok(InteractiveInput::Quit) => break,
            Ok(InteractiveInput::Page(page)) => {
                session.change_page(page).await?;
            }
            Ok(InteractiveInput::Search(text)) => {
                session.input(text).await?;
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    session.shutdown().await?;
    printer.abort();
    Ok(())
}

fn format_snapshot(snapshot: &SessionSnapshot) -> String {
    format!(
        "── {} ──\n{}",
        snapshot.url,
        render::session_content(&snapshot.content)
    )
}

#[derive(Debug, PartialEq, Eq)]
enum InteractiveInput {
    Search(String),
    Page(u32),
    Quit,
}

fn parse_line(line: &str) -> anyhow::Result<InteractiveInput> {
    let trimmed = line.trim();
    if trimmed == ":quit" || trimmed == ":q" {
        return Ok(InteractiveInput::Quit);
    }
    if let Some(rest) = trimmed.strip_prefix(":page") {
        let page: u32 = rest
            .trim()
            .parse()
            .with_context(|| format!("Not a page number: {:?}", rest.trim()))?;
        if page == 0 {
            bail!("Pages start at 1");
        }
        return Ok(InteractiveInput::Page(page));
    }
    Ok(InteractiveInput::Search(line.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(":quit").unwrap(), InteractiveInput::Quit);
        assert_eq!(parse_line(" :page 3 ").unwrap(), InteractiveInput::Page(3));
        assert!(parse_line(":page zero").is_err());
        assert!(parse_line(":page 0").is_err());
        assert_eq!(
            parse_line("blade runner").unwrap(),
            InteractiveInput::Search("blade runner".to_string())
        );
        assert_eq!(
            parse_line("").unwrap(),
            InteractiveInput::Search(String::new())
        );
    }
}
