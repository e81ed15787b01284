//! Study Planner CLI
//!
//! Drives the planner widgets against a live server from the terminal:
//! - Show the XP/level widget
//! - Chat with the assistant
//! - Preview the XP toast
//! - Print the header clock
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::rc::Rc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use study_planner::config::{generate_default_config, Config, LoggingConfig};
use study_planner::dom::ids;
use study_planner::{
    HttpApi, MemoryPage, PlannerUi, SystemClock, TokioScheduler, UiContext, UiElement,
};

#[derive(Parser)]
#[command(name = "planner-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal client for the study planner widgets")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Planner server URL (overrides config and PLANNER_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: standard locations)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show level, XP and band progress
    Profile,

    /// Send one message to the assistant
    Chat {
        /// Message text
        message: String,
    },

    /// Show the XP toast and refresh the profile
    Award {
        /// XP gained
        #[arg(allow_negative_numbers = true)]
        xp: i64,
    },

    /// Print the header clock
    Clock,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_ref());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    init_tracing(&config.logging);

    // Widgets are single-threaded; everything they spawn lives on this LocalSet
    let local = tokio::task::LocalSet::new();
    local.run_until(run(cli.command, config)).await
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("study_planner={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn write_default_config(output: Option<&PathBuf>) -> anyhow::Result<()> {
    let config = generate_default_config();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &config)
                .with_context(|| format!("Failed to write config to {:?}", path))?;
            println!("Config written to {:?}", path);
        }
        None => {
            print!("{}", config);
        }
    }
    Ok(())
}

async fn run(command: Commands, config: Config) -> anyhow::Result<()> {
    let api = HttpApi::new(&config.api)?;
    let base_url = api.base_url().to_string();
    let page = Rc::new(MemoryPage::planner_shell());

    let ui = PlannerUi::new(UiContext {
        page: page.clone(),
        api: Rc::new(api),
        scheduler: Rc::new(TokioScheduler::new()),
        wall_clock: Rc::new(SystemClock),
        config: config.ui.clone(),
    });

    match command {
        Commands::Profile => {
            if let Err(e) = ui.update_profile().await {
                eprintln!("Cannot fetch profile from {}", base_url);
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
            print_profile(&page);
        }

        Commands::Chat { message } => {
            if let Some(input) = page.find(ids::CHAT_INPUT) {
                input.set_value(&message);
            }
            ui.toggle_chat();

            let Some(outcome) = ui.send_chat().await else {
                bail!("Nothing to send");
            };
            print_transcript(&page);
            if let Err(e) = outcome {
                eprintln!();
                eprintln!("Chat request to {} failed: {}", base_url, e);
            }
        }

        Commands::Award { xp } => {
            if !ui.show_xp_toast(xp) {
                println!("No XP to award ({})", xp);
                return Ok(());
            }
            for toast in page.find_all(".toast") {
                println!("[toast] {}", toast.text());
            }

            // Let the toast run its course; the profile refresh finishes well within it
            tokio::time::sleep(config.ui.toast_lifetime()).await;
            tokio::task::yield_now().await;

            println!();
            print_profile(&page);
            println!("Toasts on screen: {}", page.find_all(".toast").len());
        }

        Commands::Clock => {
            ui.tick_clock();
            let time = page
                .find(ids::CURRENT_TIME)
                .map(|el| el.text())
                .unwrap_or_default();
            println!("{}", time);
        }

        Commands::Config { output } => write_default_config(output.as_ref())?,
    }

    Ok(())
}

fn print_profile(page: &MemoryPage) {
    let text = |id: &str| page.find(id).map(|el| el.text()).unwrap_or_default();
    let fill = page
        .find(ids::NAV_XP_FILL)
        .and_then(|el| el.style("width"))
        .unwrap_or_else(|| "-".to_string());

    println!("{:<10} {}", "Level:", text(ids::NAV_LEVEL));
    println!("{:<10} {}", "XP:", text(ids::NAV_XP));
    println!("{:<10} {}", "Progress:", fill);
}

fn print_transcript(page: &MemoryPage) {
    let Some(messages) = page.find(ids::CHATBOT_MESSAGES) else {
        return;
    };
    for message in messages.children() {
        let who = if message.has_class("user") { "you" } else { "assistant" };
        println!("{:>9}: {}", who, message.text());
    }
}
