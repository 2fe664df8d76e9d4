use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use fitnest_core::config::history_limit_from_env_value;
use fitnest_core::{
    estimate_health_score, leading_systolic, score_percent, CoreConfig, FileVitalsRepository,
    HealthAssessment, PartialScores, UserId, VitalKind, VitalReading, VitalSignEntry,
    VitalSignForm, VitalsService, DEFAULT_DATA_DIR,
};

#[derive(Parser)]
#[command(name = "fitnest")]
#[command(about = "FitNest vital signs CLI")]
struct Cli {
    /// Directory holding stored vital signs
    #[arg(long, global = true, env = "FITNEST_DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a reading without storing it
    Score(ScoreArgs),
    /// Validate and store a reading
    Record {
        /// User the reading belongs to
        user_id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Show the latest reading and its health score
    Latest {
        /// User whose reading to show
        user_id: String,
    },
    /// List recent readings, newest first
    History {
        /// User whose readings to list
        user_id: String,
        /// Maximum number of readings (defaults to FITNEST_HISTORY_LIMIT)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the vitals dashboard for the latest reading
    Dashboard {
        /// User whose dashboard to show
        user_id: String,
    },
}

#[derive(Args)]
struct ScoreArgs {
    /// Pulse (beats/min)
    #[arg(long, allow_negative_numbers = true)]
    pulse: i32,
    /// Temperature (°C)
    #[arg(long, allow_negative_numbers = true)]
    temperature: f64,
    /// Glucose (mg/dL)
    #[arg(long, allow_negative_numbers = true)]
    glucose: i32,
    /// SpO2 (%)
    #[arg(long, allow_negative_numbers = true)]
    spo2: i32,
    /// Respiratory rate (breaths/min)
    #[arg(long, allow_negative_numbers = true)]
    respiratory_rate: i32,
    /// Blood pressure, systolic/diastolic or systolic only
    #[arg(long)]
    blood_pressure: String,
}

/// Raw form fields, validated by the core exactly as typed.
#[derive(Args)]
struct FormArgs {
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    pulse: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    temperature: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    glucose: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    spo2: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    respiratory_rate: String,
    #[arg(long, default_value = "", allow_hyphen_values = true)]
    blood_pressure: String,
}

impl From<FormArgs> for VitalSignForm {
    fn from(args: FormArgs) -> Self {
        Self {
            pulse: args.pulse,
            temperature: args.temperature,
            glucose: args.glucose,
            spo2: args.spo2,
            respiratory_rate: args.respiratory_rate,
            blood_pressure: args.blood_pressure,
        }
    }
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| millis.to_string())
}

fn format_value(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".into())
}

fn print_entry(entry: &VitalSignEntry) {
    println!(
        "{}  pulse {}  temp {}  glucose {}  spo2 {}  resp {}  bp {}",
        format_timestamp(entry.timestamp),
        format_value(entry.pulse),
        format_value(entry.temperature),
        format_value(entry.glucose),
        format_value(entry.spo2),
        format_value(entry.respiratory_rate),
        entry.blood_pressure.as_deref().unwrap_or("-"),
    );
}

fn print_partials(partials: &PartialScores) {
    for kind in VitalKind::ALL {
        println!("  {:<18} {:.1}", kind.label(), partials.get(kind));
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let history_limit = history_limit_from_env_value(std::env::var("FITNEST_HISTORY_LIMIT").ok())?;
    let cfg = Arc::new(CoreConfig::new(cli.data_dir, history_limit)?);
    let repo = Arc::new(FileVitalsRepository::new(&cfg));
    let service = VitalsService::new(cfg, repo);

    match cli.command {
        Some(Commands::Score(args)) => {
            let reading = VitalReading {
                pulse: args.pulse,
                temperature: args.temperature,
                glucose: args.glucose,
                spo2: args.spo2,
                respiratory_rate: args.respiratory_rate,
                blood_pressure: leading_systolic(&args.blood_pressure),
            };
            let score = estimate_health_score(&reading);
            println!("Health score: {}% ({:.4})", score_percent(score), score);
        }
        Some(Commands::Record { user_id, form }) => {
            let user = UserId::new(&user_id)?;
            match service.submit(&user, &form.into()) {
                Ok(entry) => {
                    println!("Vital signs submitted successfully.");
                    print_entry(&entry);
                }
                Err(e) => eprintln!("Error submitting vital signs: {}", e),
            }
        }
        Some(Commands::Latest { user_id }) => {
            let user = UserId::new(&user_id)?;
            match service.latest(&user)? {
                Some(entry) => print_entry(&entry),
                None => println!("No vitals found for user."),
            }
            match service.latest_assessment(&user)? {
                HealthAssessment::Scored { score, partials } => {
                    println!("Health score: {}%", score_percent(score));
                    print_partials(&partials);
                }
                HealthAssessment::InsufficientData { missing } => {
                    let names: Vec<&str> = missing.iter().map(|k| k.as_str()).collect();
                    println!("Health score unavailable, missing: {}", names.join(", "));
                }
            }
        }
        Some(Commands::History { user_id, limit }) => {
            let user = UserId::new(&user_id)?;
            let entries = match limit {
                Some(limit) => service.history_with_limit(&user, limit)?,
                None => service.history(&user)?,
            };
            if entries.is_empty() {
                println!("No vitals found for user.");
            }
            for entry in &entries {
                print_entry(entry);
            }
        }
        Some(Commands::Dashboard { user_id }) => {
            let user = UserId::new(&user_id)?;
            let dashboard = service.dashboard(&user)?;
            println!("Health score: {}%", dashboard.percent);
            for row in &dashboard.rows {
                println!(
                    "{} {:<18} {:>14}  [{:<20}]",
                    row.icon,
                    row.label,
                    row.value,
                    "#".repeat((row.progress * 20.0).round() as usize)
                );
            }
        }
        None => {
            println!("Use 'fitnest --help' for commands");
        }
    }

    Ok(())
}
