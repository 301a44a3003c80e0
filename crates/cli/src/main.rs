mod output;

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use jitpages_engine::{HttpJsonFetcher, PageStore, fetch_selected_page_data, plan_page};
use jitpages_types::{FieldProperty, NewPage, Page, PageSize};
use jitpages_util::Settings;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Pages bound to JSON endpoints. Runs the terminal UI when no subcommand is given.
#[derive(Parser, Debug)]
#[command(name = "jitpages", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a URL once and print it the way a page would show it
    Show(ShowArgs),
    /// Print the fields derived from a URL's JSON, one per line
    Fields {
        /// Endpoint returning JSON
        url: String,
    },
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Endpoint returning JSON
    url: String,

    /// Rows per table page: 5, 20, any positive number, or `all`
    #[arg(long, value_name = "N|all")]
    page_size: Option<PageSize>,

    /// Table page to print, starting at 1
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Hide a field; repeat for several
    #[arg(long = "hide", value_name = "KEY")]
    hide: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::from_env().context("invalid configuration")?;

    match cli.command {
        // No subcommand => TUI
        None => {
            init_file_tracing(&settings.log_file)?;
            jitpages_tui::run(settings).await
        }
        Some(Command::Show(args)) => {
            init_tracing();
            run_show(&settings, args).await
        }
        Some(Command::Fields { url }) => {
            init_tracing();
            run_fields(&settings, &url).await
        }
    }
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Subcommands log to stderr so stdout carries only their output.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .try_init();
}

/// The TUI owns the terminal, so its logs go to a file.
fn init_file_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

/// Create a throwaway page for `url` and fetch it.
async fn fetch_page(settings: &Settings, url: &str) -> Result<(PageStore, Page)> {
    let fetcher = HttpJsonFetcher::new(&settings.http).context("build HTTP client")?;
    let mut store = PageStore::new();
    let page_id = store.create_page(NewPage::named(url).with_url(url));
    fetch_selected_page_data(&mut store, &fetcher)
        .await
        .with_context(|| format!("fetch {url}"))?;
    let page = store.page(page_id).cloned().context("page vanished after fetch")?;
    Ok((store, page))
}

async fn run_show(settings: &Settings, args: ShowArgs) -> Result<()> {
    let (mut store, page) = fetch_page(settings, &args.url).await?;

    for key in &args.hide {
        if !page.fields.iter().any(|field| &field.key == key) {
            warn!(%key, "no such field to hide");
        }
    }
    let fields = hide_fields(&page.fields, &args.hide);
    store.update_page_fields(page.id, fields);
    let page = store.page(page.id).context("page vanished after field update")?;

    let page_size = args.page_size.unwrap_or(settings.initial_page_size);
    let plan = plan_page(page, page_size, args.page.saturating_sub(1));
    print!("{}", output::format_plan(&plan));
    Ok(())
}

async fn run_fields(settings: &Settings, url: &str) -> Result<()> {
    let (_, page) = fetch_page(settings, url).await?;
    print!("{}", output::format_fields(&page.fields));
    Ok(())
}

/// `fields` with every key in `hidden` marked not visible.
fn hide_fields(fields: &[FieldProperty], hidden: &[String]) -> Vec<FieldProperty> {
    fields
        .iter()
        .map(|field| FieldProperty {
            key: field.key.clone(),
            visible: field.visible && !hidden.contains(&field.key),
        })
        .collect()
}
