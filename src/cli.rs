//! Command-line front end: collects a draft, shows every validation error, prints the estimate
//! and optionally hands the lead to a persistence sink.

use std::{fs, path::PathBuf, process::ExitCode};

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};
use time::OffsetDateTime;
use tracing::error;

use salon_valuation::{
    domain::{
        estimate, validate, ProfitMarginChoice, ProfitMode, ValuationDraft, ValuationError,
        ValuationLead, ValuationResult,
    },
    infra::{FileLeadStore, LeadSink, RestLeadSink},
    util::{
        format::{age_string, format_adjustment, format_currency, format_multiple},
        persistence::{load_settings, save_settings, settings_path, PersistedSettings, RemoteSinkSettings},
        version::{engine_version, version_label},
    },
};

#[derive(Parser, Debug)]
#[command(name = "salon-valuation")]
#[command(about = "Estimate what a salon is worth from revenue, profit and reputation signals")]
#[command(
    long_about = "Estimates a salon's sale value from its Seller's Discretionary Earnings and a market multiple.\nExamples:\n  salon-valuation estimate --revenue 50000 --years 5 --location 90210 --margin normal\n  salon-valuation validate --input draft.json"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Settings file path (defaults to the platform config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate the inputs and print a valuation range
    Estimate(EstimateArgs),

    /// Check the inputs and list every problem found
    Validate {
        #[command(flatten)]
        draft: DraftArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect locally stored valuation leads
    #[command(subcommand)]
    Leads(LeadsCommand),

    /// Inspect or reset the settings file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Default)]
pub struct DraftArgs {
    /// JSON draft to start from (camelCase form fields); flags override its values
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Gross monthly revenue
    #[arg(long, allow_negative_numbers = true)]
    pub revenue: Option<f64>,

    /// Years in business
    #[arg(long, allow_negative_numbers = true)]
    pub years: Option<f64>,

    /// City or ZIP code
    #[arg(long)]
    pub location: Option<String>,

    /// Estimated profit margin
    #[arg(long, value_enum)]
    pub margin: Option<MarginArg>,

    /// Actual monthly profit in dollars (instead of --margin)
    #[arg(long, conflicts_with = "margin", allow_negative_numbers = true)]
    pub actual_profit: Option<f64>,

    /// The salon has a loyal repeat-client base
    #[arg(long)]
    pub loyal: bool,

    /// Google rating, 0-5
    #[arg(long, allow_negative_numbers = true)]
    pub rating: Option<f64>,

    /// Number of Google reviews
    #[arg(long)]
    pub reviews: Option<u32>,

    /// Number of stations (chairs/tables)
    #[arg(long)]
    pub stations: Option<u32>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MarginArg {
    Low,
    Normal,
    High,
}

impl From<MarginArg> for ProfitMarginChoice {
    fn from(value: MarginArg) -> Self {
        match value {
            MarginArg::Low => ProfitMarginChoice::Low,
            MarginArg::Normal => ProfitMarginChoice::Normal,
            MarginArg::High => ProfitMarginChoice::High,
        }
    }
}

#[derive(Args, Debug)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub draft: DraftArgs,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Store the valuation as a lead record
    #[arg(long)]
    pub save: bool,

    /// Contact email stored with the lead
    #[arg(long, requires = "save")]
    pub email: Option<String>,

    /// Base URL of a REST table to store leads in instead of the local log
    #[arg(long, env = "SALON_VALUATION_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// API key for the remote table
    #[arg(long, env = "SALON_VALUATION_REMOTE_KEY", hide_env_values = true)]
    pub remote_key: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum LeadsCommand {
    /// List stored leads, newest first
    List {
        /// Maximum number of leads to show
        #[arg(long, default_value_t = 20)]
        limit: usize,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective settings
    Show,
    /// Print the settings file path
    Path,
    /// Overwrite the settings file with defaults
    Reset,
}

impl DraftArgs {
    pub fn into_draft(self) -> anyhow::Result<ValuationDraft> {
        let mut draft = match &self.input {
            Some(path) => {
                let data = fs::read_to_string(path)
                    .with_context(|| format!("failed to read draft {}", path.display()))?;
                serde_json::from_str(&data)
                    .with_context(|| format!("failed to parse draft {}", path.display()))?
            }
            None => ValuationDraft::default(),
        };

        if let Some(revenue) = self.revenue {
            draft.monthly_revenue = Some(revenue);
        }
        if let Some(years) = self.years {
            draft.years_in_business = Some(years);
        }
        if let Some(location) = self.location {
            draft.location = Some(location);
        }
        if let Some(margin) = self.margin {
            draft.profit_mode = ProfitMode::Estimate;
            draft.profit_margin_choice = Some(margin.into());
        }
        if let Some(profit) = self.actual_profit {
            draft.profit_mode = ProfitMode::Actual;
            draft.monthly_profit = Some(profit);
        }
        if self.loyal {
            draft.has_loyal_client_base = Some(true);
        }
        if let Some(rating) = self.rating {
            draft.google_rating = Some(rating);
        }
        if let Some(reviews) = self.reviews {
            draft.google_review_count = Some(reviews);
        }
        if let Some(stations) = self.stations {
            draft.number_of_stations = Some(stations);
        }

        Ok(draft)
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let path = settings_path(cli.config.as_deref())?;

    match cli.command {
        Command::Estimate(args) => {
            let settings = load_settings(&path)?;
            run_estimate(args, settings).await
        }
        Command::Validate { draft, json } => {
            let report = validate(&draft.into_draft()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.valid {
                println!("All inputs look good.");
            } else {
                print_errors(&report.errors);
            }
            Ok(exit_code(report.valid))
        }
        Command::Leads(LeadsCommand::List { limit, json }) => {
            let leads = FileLeadStore::open_default()?.list()?;
            let shown: Vec<_> = leads.into_iter().take(limit).collect();
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                println!("{}", render_leads(&shown, OffsetDateTime::now_utc()));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(ConfigCommand::Path) => {
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(ConfigCommand::Show) => {
            let mut settings = load_settings(&path)?;
            if let Some(remote) = settings.remote.as_mut() {
                remote.api_key = mask_key(&remote.api_key);
            }
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Config(ConfigCommand::Reset) => {
            save_settings(&path, &PersistedSettings::default())?;
            println!("Wrote default settings to {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_estimate(args: EstimateArgs, settings: PersistedSettings) -> anyhow::Result<ExitCode> {
    let draft = args.draft.into_draft()?;

    let result = match estimate(&draft, &settings.params) {
        Ok(result) => result,
        Err(ValuationError::InvalidInputs(report)) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_errors(&report.errors);
            }
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_report(&result));
    }

    if !args.save {
        return Ok(ExitCode::SUCCESS);
    }

    let remote = match (args.remote_url, args.remote_key) {
        (Some(base_url), Some(api_key)) => Some(RemoteSinkSettings::new(base_url, api_key)),
        (Some(_), None) => bail!("--remote-url needs --remote-key"),
        _ => settings.remote,
    };
    let sink = match remote {
        Some(remote) => LeadSink::Remote(RestLeadSink::new(&remote)?),
        None => LeadSink::Local(FileLeadStore::open_default()?),
    };

    let inputs = draft
        .into_inputs()
        .map_err(|report| anyhow!(report.errors.join(" ")))?;
    let lead = ValuationLead::new(inputs, result, args.email, engine_version());

    match sink.create_record(&lead).await {
        Ok(()) => {
            if !args.json {
                println!("Saved lead {} to {}", lead.id, sink.describe());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(error = %err, "failed to save valuation lead");
            eprintln!("Estimate shown above was not saved: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn exit_code(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_errors(errors: &[String]) {
    println!("Please fix the following:");
    for message in errors {
        println!("  - {message}");
    }
}

fn mask_key(key: &str) -> String {
    let visible: String = key.chars().take(4).collect();
    format!("{visible}…")
}

pub fn render_report(result: &ValuationResult) -> String {
    let breakdown = &result.breakdown;
    let adjustments = &breakdown.adjustments;
    let mut lines = vec![
        format!(
            "Estimated value: {} - {}",
            format_currency(result.low),
            format_currency(result.high)
        ),
        format!("Midpoint:        {}", format_currency(result.base)),
        String::new(),
        format!("Annual SDE:      {}", format_currency(breakdown.annual_sde)),
        format!(
            "Multiple:        {} ({}, tier {})",
            format_multiple(breakdown.final_multiple),
            breakdown.location_area_name,
            breakdown.location_tier
        ),
        format!(
            "  base {}  location {}  age {}  reputation {}  loyalty {}",
            format_multiple(adjustments.base_multiple),
            format_adjustment(adjustments.location),
            format_adjustment(adjustments.age),
            format_adjustment(adjustments.reputation),
            format_adjustment(adjustments.loyalty),
        ),
    ];
    if (adjustments.unclamped_multiple - breakdown.final_multiple).abs() >= 0.005 {
        lines.push(format!(
            "  capped from {}",
            format_multiple(adjustments.unclamped_multiple)
        ));
    }
    if breakdown.assets_added > 0.0 {
        lines.push(format!(
            "Station assets:  {} (included above)",
            format_currency(breakdown.assets_added)
        ));
    }
    lines.push(String::new());
    lines.push(format!(
        "This is an estimate, not an appraisal. Engine {}",
        version_label()
    ));
    lines.join("\n")
}

pub fn render_leads(leads: &[ValuationLead], now: OffsetDateTime) -> String {
    if leads.is_empty() {
        return "No valuation leads stored yet.".to_string();
    }
    leads
        .iter()
        .map(|lead| {
            format!(
                "{}  {:>5} ago  {:<24}  {}  {}",
                lead.id,
                age_string(lead.created_at, now),
                lead.inputs.location,
                format_currency(lead.result.base),
                lead.email.as_deref().unwrap_or("-"),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
