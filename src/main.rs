use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use uvg_core::{Config, PreferenceField, SqliteStore};
use uvg_dashboard::Dashboard;
use uvg_reminder::{format_hms, SystemClock, TimerEvent, TimerPhase};
use uvg_weather::GatewayClient;

#[derive(Parser)]
#[command(name = "uv-guardian", version, about = "UV index, sunscreen advice and reapply reminders")]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the full dashboard
    Status {
        /// Search this place before rendering
        #[arg(long)]
        place: Option<String>,
    },
    /// Look up current weather and UV for a place
    Search { place: String },
    /// Show or edit the user profile
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
    /// Control the sunscreen reapplication timer
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },
    /// Print the cancer rate series
    Charts,
}

#[derive(Subcommand)]
enum PrefsAction {
    Show,
    Set {
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long)]
        skin_type: Option<String>,
    },
}

#[derive(Subcommand)]
enum TimerAction {
    Start,
    Stop,
    Toggle,
    /// Dismiss a reminder that has come due
    Ack,
    Status,
    /// Start if idle, then count down until the reminder fires
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    uvg_core::init()?;
    let cli = Cli::parse();

    let (config, _) = Config::load_validated(cli.config.as_deref())?;
    tracing::debug!("Using config directory {}", config.config_dir.display());

    let store = SqliteStore::open(config.db_path())
        .with_context(|| format!("Failed to open store at {}", config.db_path().display()))?;
    let gateway =
        GatewayClient::new(&config.gateway.base_url).context("Invalid gateway base URL")?;
    let mut dashboard = Dashboard::new(
        gateway,
        Arc::new(store),
        Arc::new(SystemClock),
        Duration::from_secs(config.reminder.duration_secs),
    );

    match cli.command.unwrap_or(Command::Status { place: None }) {
        Command::Status { place } => {
            dashboard.load().await;
            if let Some(place) = place {
                dashboard.search(&place).await;
            }
            print!("{}", dashboard.view());
        }
        Command::Search { place } => {
            if !dashboard.search(&place).await {
                println!("No weather found for {:?}", place);
            }
            print!("{}", dashboard.view());
        }
        Command::Prefs { action } => run_prefs(&mut dashboard, action).await?,
        Command::Timer { action } => run_timer(&mut dashboard, action).await?,
        Command::Charts => {
            dashboard.load().await;
            let view = dashboard.view();
            println!("Cancer Rate Trend (per 100,000)");
            for point in &view.cancer_history {
                println!("  {}  {:>8.1}  {}", point.year, point.rate, point.gender);
            }
            println!("Male vs. Female: {}", view.gender_shares().join(", "));
        }
    }

    Ok(())
}

async fn run_prefs(dashboard: &mut Dashboard, action: PrefsAction) -> Result<()> {
    if let PrefsAction::Set {
        age,
        gender,
        skin_type,
    } = action
    {
        let edits = [
            (PreferenceField::Age, age),
            (PreferenceField::Gender, gender),
            (PreferenceField::SkinType, skin_type),
        ];
        for (field, raw) in edits {
            let Some(raw) = raw else { continue };
            dashboard
                .apply_edit(field, &raw)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
        }
    }

    let prefs = dashboard.preferences();
    println!("Age:       {}", prefs.age);
    println!("Gender:    {}", prefs.gender);
    println!("Skin type: {}", prefs.skin_type);
    Ok(())
}

async fn run_timer(dashboard: &mut Dashboard, action: TimerAction) -> Result<()> {
    match action {
        TimerAction::Start => {
            if !dashboard.start_timer() {
                println!("Timer is already {:?}", dashboard.timer_state().phase);
            }
        }
        TimerAction::Stop => {
            dashboard.stop_timer();
        }
        TimerAction::Toggle => {
            dashboard.toggle_timer();
        }
        TimerAction::Ack => {
            if !dashboard.acknowledge_reminder() {
                println!("No reminder is showing");
            }
        }
        TimerAction::Status => {}
        TimerAction::Watch => return watch(dashboard).await,
    }

    print_timer(dashboard);
    Ok(())
}

fn print_timer(dashboard: &Dashboard) {
    let view = dashboard.view();
    println!(
        "{} [{}] ({})",
        view.timer_display(),
        view.timer_button(),
        view.timer_color()
    );
    if let Some((title, body)) = view.reminder() {
        println!("*** {} ***\n{}", title, body);
    }
}

async fn watch(dashboard: &mut Dashboard) -> Result<()> {
    if dashboard.timer_state().phase == TimerPhase::Idle {
        dashboard.start_timer();
    }
    println!("Counting down. Ctrl-C leaves the timer running.");

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                println!();
                return Ok(());
            }
            event = dashboard.next_timer_event() => match event {
                Some(TimerEvent::Tick { remaining_secs }) => {
                    print!("\r{}", format_hms(remaining_secs));
                    std::io::stdout().flush().context("Failed to flush stdout")?;
                }
                Some(TimerEvent::ReminderDue) | None => break,
            }
        }
    }

    println!();
    print_timer(dashboard);
    println!("Press Enter to dismiss.");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read stdin")?;
    dashboard.acknowledge_reminder();
    print_timer(dashboard);
    Ok(())
}
