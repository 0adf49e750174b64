//! CLI command implementations

use anyhow::bail;
use clap::Subcommand;
use moodreel_core::{ContentType, MoodTable, MoodreelConfig, MoodreelError, RuntimeMode};
use moodreel_search::{QueryView, provider_for_mode, spawn_search_session};

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
        /// Use the built-in demo catalog instead of OMDb
        #[arg(long)]
        demo: bool,
    },
    /// Search the catalog for a mood
    Search {
        /// How you feel, e.g. "happy" or "mind-blown"
        mood: String,
        /// Kind of title to look for (movie or series)
        #[arg(short = 't', long = "type")]
        content_type: ContentType,
        /// Result page to show
        #[arg(short, long, default_value = "1")]
        page: u32,
        /// Use the built-in demo catalog instead of OMDb
        #[arg(long)]
        demo: bool,
        /// Print the session snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every known mood and the keyword it searches for
    Moods,
}

/// Handle the CLI command
///
/// # Errors
/// Returns the failure of the command that ran: invalid configuration,
/// rejected input, an unreachable catalog or a server that failed to start.
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { host, port, demo } => serve(host, port, demo).await,
        Commands::Search {
            mood,
            content_type,
            page,
            demo,
            json,
        } => search(&mood, content_type, page, demo, json).await,
        Commands::Moods => {
            list_moods();
            Ok(())
        }
    }
}

/// Loads configuration from the environment and checks it for `demo`.
fn load_config(demo: bool) -> anyhow::Result<(MoodreelConfig, RuntimeMode)> {
    let mode = RuntimeMode::from_demo_flag(demo);
    let config = MoodreelConfig::from_env();
    config.validate(mode).map_err(|e| {
        if e.is_user_error() && mode.is_production() {
            anyhow::anyhow!(
                "{}. Run with --demo to use the built-in catalog.",
                e.user_message()
            )
        } else {
            anyhow::anyhow!(e.user_message())
        }
    })?;
    Ok((config, mode))
}

/// Start the web server
pub async fn serve(host: String, port: u16, demo: bool) -> anyhow::Result<()> {
    let (mut config, mode) = load_config(demo)?;
    config.web.host = host;
    config.web.port = port;

    tracing::info!(%mode, address = %config.web.bind_address(), "Starting web server");
    moodreel_web::run_server(config, mode)
        .await
        .map_err(|e| anyhow::anyhow!(MoodreelError::from(e).user_message()))?;
    Ok(())
}

/// Run one search and print the requested page
pub async fn search(
    mood: &str,
    content_type: ContentType,
    page: u32,
    demo: bool,
    json: bool,
) -> anyhow::Result<()> {
    if page == 0 {
        bail!("Pages start at 1");
    }

    let (config, mode) = load_config(demo)?;
    let provider = provider_for_mode(mode, &config.catalog)?;
    let session = spawn_search_session(provider);

    session
        .submit_search(mood, content_type)
        .await
        .map_err(|e| anyhow::anyhow!(e.user_message()))?;
    let mut view = session.wait_until_settled().await?;

    if page > 1 && view.error.is_none() {
        let delta = i64::from(page) - 1;
        if session.go_to_page(delta).await?.is_none() {
            bail!(
                "Page {page} is past the last page ({} of {} results)",
                view.page_count,
                view.total_count
            );
        }
        view = session.wait_until_settled().await?;
    }

    session.shutdown().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    if let Some(error) = view.error {
        bail!(error);
    }
    print_results(mood, &view);
    Ok(())
}

fn print_results(mood: &str, view: &QueryView) {
    println!(
        "Results for '{mood}' ({}, {})",
        view.keyword.as_deref().unwrap_or_default(),
        view.content_type
    );
    println!("{:-<60}", "");

    for (index, movie) in view.results.iter().enumerate() {
        println!("{:>3}. {} ({}) [{}]", index + 1, movie.title, movie.year, movie.id);
    }

    println!("{:-<60}", "");
    println!(
        "Page {} of {}, {} results total",
        view.page, view.page_count, view.total_count
    );
    if view.has_next {
        println!("Use --page {} for more.", view.page + 1);
    }
}

/// List every mood in the table
pub fn list_moods() {
    let table = MoodTable::builtin();

    println!("{:<16} Keyword", "Mood");
    println!("{:-<40}", "");
    for entry in table.moods() {
        println!("{:<16} {}", entry.mood, entry.keyword);
    }
    println!("\n{} moods available.", table.len());
}
