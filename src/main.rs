//! Spendwise CLI
//!
//! Terminal front end for a running Spendwise API:
//! - Show summary totals
//! - List and filter entries
//! - Add and delete entries
//! - Export CSV
//! - Browse interactively

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spendwise::client::HttpExpenseClient;
use spendwise::config::{generate_default_config, Config};
use spendwise::controller::{TerminalView, ViewController};
use spendwise::model::{EntryForm, Filter};

type Controller = ViewController<HttpExpenseClient, TerminalView<std::io::Stdout>>;

#[derive(Parser)]
#[command(name = "spendwise")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal expense tracker")]
#[command(long_about = "Spendwise keeps a ledger of expenses and income.\nRun `spendwise-api` first, then use these commands against it.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL (default: from config, then http://localhost:5000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: search the usual locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show total expense, total income and net balance
    Summary,

    /// List entries, newest first
    List {
        /// Show pages 1 through N
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// List entries matching a date range and/or category
    Filter {
        /// First date to include (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        start: String,
        /// Last date to include (YYYY-MM-DD)
        #[arg(short, long, default_value = "")]
        end: String,
        /// Exact category
        #[arg(short, long, default_value = "")]
        category: String,
    },

    /// Add an expense or income entry
    Add {
        /// Entry date (YYYY-MM-DD, default: today)
        #[arg(short, long)]
        date: Option<String>,
        /// What the entry was for
        #[arg(short = 'D', long)]
        description: String,
        /// Amount (positive; the type decides the sign)
        #[arg(short, long)]
        amount: String,
        /// expense or income
        #[arg(short = 't', long = "type", default_value = "expense")]
        entry_type: String,
        /// Category label
        #[arg(short, long)]
        category: String,
    },

    /// Delete an entry by id
    Delete {
        id: i64,
    },

    /// Download every entry as CSV
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Interactive session: summary, entries and load-more
    Browse,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spendwise=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.client.base_url = url;
    }

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let client = HttpExpenseClient::new(config.client.client_config())
        .with_context(|| format!("Invalid API URL {}", config.client.base_url))?;
    let mut controller = ViewController::new(client, TerminalView::stdout())
        .currency_symbol(config.client.currency_symbol.clone())
        .page_size(config.client.page_size.max(1));

    match cli.command {
        Commands::Summary => {
            if !controller.refresh_summary().await {
                unreachable_api(&config.client.base_url)?;
            }
        }

        Commands::List { page } => {
            if !controller.load_entries(1).await {
                unreachable_api(&config.client.base_url)?;
            }
            while controller.entries().next_page() <= page && !controller.entries().is_exhausted() {
                if !controller.load_more().await {
                    break;
                }
            }
        }

        Commands::Filter {
            start,
            end,
            category,
        } => {
            let filter = Filter::from_inputs(&start, &end, &category)
                .context("Dates must be YYYY-MM-DD")?;
            if !controller.apply_filter(filter).await {
                unreachable_api(&config.client.base_url)?;
            }
        }

        Commands::Add {
            date,
            description,
            amount,
            entry_type,
            category,
        } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%d").to_string());
            let form = EntryForm::new()
                .field("date", date)
                .field("description", description)
                .field("amount", amount)
                .field("type", entry_type)
                .field("category", category);

            if !controller.submit_entry(&form).await {
                bail!("Entry was not added");
            }
        }

        Commands::Delete { id } => {
            if !controller.delete_entry(id).await {
                bail!("Entry {} was not deleted", id);
            }
            println!("Deleted entry #{}", id);
        }

        Commands::Export { output } => {
            controller.export_csv();
            export(&mut controller, output.as_deref()).await?;
        }

        Commands::Browse => browse(&mut controller).await?,

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn unreachable_api(base_url: &str) -> anyhow::Result<()> {
    eprintln!("Cannot reach the Spendwise API at {}", base_url);
    eprintln!();
    eprintln!("Make sure the API server is running:");
    eprintln!("  cargo run --bin spendwise-api");
    bail!("request failed")
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

/// Follow a pending export navigation by downloading the file
async fn export(controller: &mut Controller, output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let Some(url) = controller.view_mut().take_download() else {
        return Ok(());
    };
    tracing::debug!(url = %url, "Downloading export");

    match output {
        Some(path) => {
            let bytes = controller.api().download_export(path).await?;
            println!("Exported {} bytes to {:?}", bytes, path);
        }
        None => {
            let csv = controller.api().fetch_export().await?;
            print!("{}", csv);
        }
    }
    Ok(())
}

const BROWSE_HELP: &str = "\
Commands:
  more                         load the next page
  filter <start> <end> [cat]   filter by dates (use - to leave one open)
  clear                        leave the filtered list
  summary                      refresh the totals
  reload                       reload the first page
  export [file]                download the CSV (default: expenses.csv)
  quit                         leave";

async fn browse(controller: &mut Controller) -> anyhow::Result<()> {
    controller.initialize().await;
    println!();
    println!("{}", BROWSE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] | ["exit"] => break,
            ["more"] | ["m"] => {
                if controller.entries().active_filter().is_some() {
                    println!("Filtered list shows a single page; use `clear` to page again.");
                } else if controller.entries().is_exhausted() {
                    println!("No more entries.");
                } else {
                    controller.load_more().await;
                }
            }
            ["filter", rest @ ..] => {
                let arg = |i: usize| rest.get(i).copied().filter(|s| *s != "-").unwrap_or("");
                match Filter::from_inputs(arg(0), arg(1), arg(2)) {
                    Ok(filter) => {
                        controller.apply_filter(filter).await;
                    }
                    Err(e) => println!("Invalid date: {}", e),
                }
            }
            ["clear"] => {
                controller.clear_filter().await;
            }
            ["summary"] | ["s"] => {
                controller.refresh_summary().await;
            }
            ["reload"] | ["r"] => {
                controller.load_entries(1).await;
            }
            ["export", rest @ ..] => {
                let path = PathBuf::from(rest.first().copied().unwrap_or("expenses.csv"));
                controller.export_csv();
                if let Err(e) = export(controller, Some(&path)).await {
                    println!("Export failed: {}", e);
                }
            }
            _ => println!("{}", BROWSE_HELP),
        }
    }

    Ok(())
}
