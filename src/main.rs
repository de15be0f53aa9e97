use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use subkeep::cli::{
    handle_calendar_command, handle_cancel_command, handle_day_command, handle_recommend_command,
    handle_report_command, handle_simulate_add_command, handle_simulate_cancel_command,
    handle_summary_command, handle_upcoming_command, parse_date, parse_user, CliContext,
};
use subkeep::clock::{Clock, SystemClock};
use subkeep::config::{paths::SubkeepPaths, settings::Settings};
use subkeep::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "subkeep",
    version,
    about = "Subscription cost tracking: normalized totals, billing calendar and what-if simulations",
    long_about = "subkeep reads a portfolio of recurring subscriptions and answers cost \
                  questions about it: what is owed per month, which subscriptions bill \
                  on which day, how shared costs split, and what would change if some \
                  were cancelled or a new one added."
)]
struct Cli {
    /// Portfolio file (defaults to the data directory's portfolio.json)
    #[arg(long, global = true, env = "SUBKEEP_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// User id whose subscriptions are reported on
    #[arg(long, global = true, env = "SUBKEEP_USER")]
    user: Option<String>,

    /// Reference date (YYYY-MM-DD), defaults to today
    #[arg(long, global = true)]
    today: Option<String>,

    /// Print JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly and annual totals with a category breakdown
    Summary,

    /// Subscriptions worth cancelling
    Recommend,

    /// Category breakdown, 12-month trend, averages and summary
    Report {
        /// Export the category breakdown to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Export the monthly trend to a CSV file
        #[arg(long)]
        trend_csv: Option<PathBuf>,
    },

    /// Billing calendar for a month
    Calendar {
        /// Month to show (YYYY-MM)
        month: String,
    },

    /// Everything billed on one day
    Day {
        /// Date to show (YYYY-MM-DD)
        date: String,
    },

    /// Payments due soon
    Upcoming {
        /// Window in days (default 30, at most 90)
        #[arg(long, allow_hyphen_values = true)]
        days: Option<i64>,
    },

    /// Show totals as if the given subscriptions were cancelled
    SimulateCancel {
        /// Subscription ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show totals as if a new subscription were added
    SimulateAdd {
        /// Service name
        #[arg(long)]
        name: String,

        /// Amount per billing period, in smallest currency units
        #[arg(long)]
        amount: String,

        /// Billing period: weekly, monthly or yearly
        #[arg(long, default_value = "monthly")]
        period: String,

        /// Category id to file the new item under
        #[arg(long)]
        category: Option<String>,
    },

    /// Cancel subscriptions and save the portfolio
    Cancel {
        /// Subscription ids
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show current configuration and paths
    Config,
}

/// Global arguments needed to open the portfolio
struct Session {
    data_file: Option<PathBuf>,
    user: Option<String>,
    today: Option<String>,
    json: bool,
}

impl Session {
    fn open(self, paths: &SubkeepPaths, settings: Settings) -> Result<CliContext> {
        let user_id = parse_user(self.user.as_deref())?;
        let today = match self.today.as_deref() {
            Some(raw) => parse_date(raw)?,
            None => SystemClock.today(),
        };
        let data_file = self.data_file.unwrap_or_else(|| paths.portfolio_file());
        Ok(CliContext::load(data_file, user_id, today, self.json, settings)?)
    }
}

fn print_config(paths: &SubkeepPaths, settings: &Settings) {
    println!("subkeep configuration");
    println!("=====================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Portfolio file:  {}", paths.portfolio_file().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol:      {}", settings.currency_symbol);
    println!("  Undo window:          {}s", settings.undo_window_secs);
    println!(
        "  Upcoming window:      {} days (max {})",
        settings.upcoming_default_days, settings.upcoming_max_days
    );
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let paths = SubkeepPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("subkeep - subscription cost tracking");
        println!();
        println!("Run 'subkeep --help' for usage information.");
        return Ok(());
    };

    let session = Session {
        data_file: cli.data_file,
        user: cli.user,
        today: cli.today,
        json: cli.json,
    };

    match command {
        Commands::Config => print_config(&paths, &settings),
        Commands::Summary => handle_summary_command(&session.open(&paths, settings)?)?,
        Commands::Recommend => handle_recommend_command(&session.open(&paths, settings)?)?,
        Commands::Report { csv, trend_csv } => {
            handle_report_command(&session.open(&paths, settings)?, csv, trend_csv)?
        }
        Commands::Calendar { month } => {
            handle_calendar_command(&session.open(&paths, settings)?, &month)?
        }
        Commands::Day { date } => handle_day_command(&session.open(&paths, settings)?, &date)?,
        Commands::Upcoming { days } => {
            handle_upcoming_command(&session.open(&paths, settings)?, days)?
        }
        Commands::SimulateCancel { ids } => {
            handle_simulate_cancel_command(&session.open(&paths, settings)?, &ids)?
        }
        Commands::SimulateAdd {
            name,
            amount,
            period,
            category,
        } => handle_simulate_add_command(
            &session.open(&paths, settings)?,
            &name,
            &amount,
            &period,
            category,
        )?,
        Commands::Cancel { ids } => handle_cancel_command(&session.open(&paths, settings)?, &ids)?,
    }

    Ok(())
}
