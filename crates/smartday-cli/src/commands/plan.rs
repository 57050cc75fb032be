use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use smartday_core::{Config, DayScheduler, PlanRequest};

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON response
    Json,
    /// Block table and checklist
    Text,
}

#[derive(Args)]
pub struct PlanArgs {
    /// JSON request file; reads stdin when omitted or "-"
    file: Option<PathBuf>,
    /// Date to plan for (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

pub fn run(args: PlanArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let body = match &args.file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    let request: PlanRequest = serde_json::from_str(&body)?;

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let scheduler = DayScheduler::with_config(config.planner.scheduler_config());
    let plan = scheduler.plan_request(&request, config.planner.default_start(), date)?;

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plan)?),
        OutputFormat::Text => print!("{}", plan.render_text()),
    }
    Ok(())
}
