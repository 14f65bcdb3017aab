use appeal_wizard::app::App;
use appeal_wizard::config::{persistence::EventLogStorage, WizardConfig};
use appeal_wizard::events::{BackgroundAnalytics, EventLogAnalytics, FanoutAnalytics, LogAnalytics};
use appeal_wizard::models::AppealType;
use appeal_wizard::prompt::{print_events, run_prompt};
use appeal_wizard::{error, Result, WizardError, APP_NAME, LOG_FILE};
use clap::Parser;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Find out which traffic-penalty appeal to file
#[derive(Debug, Parser)]
#[command(name = "appeal-wizard", version, about)]
struct Cli {
    /// Use line-based prompts instead of the full-screen interface
    #[arg(long)]
    plain: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, env = "APPEAL_WIZARD_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Do not append analytics events to the event log
    #[arg(long)]
    no_event_log: bool,

    /// Start with this appeal type selected (prior_defense, first_instance, second_instance)
    #[arg(long, value_name = "TYPE")]
    select: Option<AppealType>,

    /// Print the most recent recorded events and exit
    #[arg(long, value_name = "COUNT", num_args = 0..=1, default_missing_value = "10")]
    show_events: Option<usize>,

    /// Delete the event log and exit
    #[arg(long, conflicts_with = "show_events")]
    clear_events: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{}", error::user_friendly_message(&e));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => WizardConfig::load_from(path)?,
        None => WizardConfig::load_or_create(&WizardConfig::config_file_path()?)?,
    };
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
        config.validate()?;
    }
    if cli.no_event_log {
        config = config.with_event_log(false);
    }

    let history_only = cli.show_events.is_some() || cli.clear_events;
    init_logging(&config.log_level, cli.plain || history_only)?;

    if history_only {
        let storage = EventLogStorage::new()?.with_max_history(config.max_event_history);
        return manage_event_log(&storage, cli.show_events, cli.clear_events);
    }

    info!(plain = cli.plain, form_route = %config.form_route, "starting appeal wizard");

    let mut sinks = FanoutAnalytics::new().with_sink(LogAnalytics);
    if config.event_log {
        let storage = EventLogStorage::new()?.with_max_history(config.max_event_history);
        sinks = sinks.with_sink(EventLogAnalytics::new(storage));
    }
    let (analytics, delivery) = BackgroundAnalytics::spawn(sinks);

    let outcome = if cli.plain {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        run_prompt(stdin.lock(), &mut stdout, &analytics, &config.form_route, cli.select)
            .map(|_| ())
    } else {
        run_tui(&config, analytics.clone(), cli.select).await
    };

    // Flush pending analytics before exiting
    drop(analytics);
    if let Err(e) = delivery.await {
        warn!(error = %e, "analytics delivery task failed");
    }

    info!("appeal wizard finished");
    outcome
}

async fn run_tui(
    config: &WizardConfig,
    analytics: BackgroundAnalytics,
    preselected: Option<AppealType>,
) -> Result<()> {
    let mut app = App::new(config, Box::new(analytics))?;
    if let Some(appeal_type) = preselected {
        app.preselect(appeal_type);
    }
    app.init()?;
    app.run().await
}

fn manage_event_log(storage: &EventLogStorage, show: Option<usize>, clear: bool) -> Result<()> {
    if clear {
        let count = storage.count_events()?;
        storage.clear_events()?;
        info!(count, path = %storage.path().display(), "event log cleared");
        println!("Removed {} recorded events.", count);
    }
    if let Some(count) = show {
        let mut stdout = std::io::stdout();
        print_events(&mut stdout, &storage.recent_events(count)?)?;
    }
    Ok(())
}

/// Initialize logging. The full-screen interface owns stdout, so it logs
/// to a file in the data directory; prompt mode logs to stderr.
fn init_logging(level: &str, plain: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("appeal_wizard={level}")));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if plain {
        builder.with_writer(std::io::stderr).init();
        return Ok(());
    }

    let log_dir = dirs::data_dir()
        .ok_or_else(|| WizardError::ConfigError("Unable to determine data directory".to_string()))?
        .join(APP_NAME);
    fs::create_dir_all(&log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE))?;

    builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    Ok(())
}
