//! Goal Planner CLI
//!
//! Command-line interface for running feasibility plans over exported household data

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use goal_planner::{
    currency::{convert_or_literal, CurrencyCode, RateTable},
    household::{load_household, load_households},
    planning::{PlanResult, StrategyCalculator},
    Assumptions, HouseholdRunner,
};
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(
    name = "goal-planner",
    version,
    about = "Check which household goals current savings can fund"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan one household from a JSON export
    Plan {
        /// Household JSON file
        household: PathBuf,
        /// Evaluation date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        as_of: Option<NaiveDate>,
        /// Directory containing planning_assumptions.csv
        #[arg(long)]
        assumptions: Option<PathBuf>,
        /// Print the full plan as JSON
        #[arg(long)]
        json: bool,
        /// Also write a per-goal CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Plan every household in a JSON array, in parallel
    Batch {
        /// JSON file holding an array of households
        households: PathBuf,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long)]
        assumptions: Option<PathBuf>,
    },
    /// Show the funding strategy for one goal
    Strategy {
        household: PathBuf,
        /// Goal id
        #[arg(long)]
        goal: String,
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long)]
        assumptions: Option<PathBuf>,
    },
    /// Convert an amount using a table of manually entered rates
    Convert {
        amount: f64,
        from: String,
        to: String,
        /// CSV file with pair,rate rows
        #[arg(long)]
        rates: PathBuf,
    },
}

/// One row of the per-goal CSV export
#[derive(Serialize)]
struct GoalRow<'a> {
    goal_id: &'a str,
    name: &'a str,
    status: &'static str,
    category: &'static str,
    months_to_deadline: f64,
    required_monthly: f64,
    funded_amount: f64,
    funding_gap: f64,
    bucket_used: &'a str,
    future_value: Option<f64>,
    required_monthly_contribution: Option<f64>,
    reason: &'a str,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Plan { household, as_of, assumptions, json, csv } => {
            let runner = HouseholdRunner::with_assumptions(load_assumptions(assumptions.as_deref())?);
            let input = load_household(&household)
                .with_context(|| format!("Failed to load household {}", household.display()))?;
            let plan = runner.run(&input, resolve_date(as_of));

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                print_plan(&input.household_id, &plan);
            }
            if let Some(path) = csv {
                write_plan_csv(&path, &plan)?;
                println!("\nGoal results written to: {}", path.display());
            }
        }
        Commands::Batch { households, as_of, assumptions } => {
            let start = Instant::now();
            let runner = HouseholdRunner::with_assumptions(load_assumptions(assumptions.as_deref())?);
            let inputs = load_households(&households)
                .with_context(|| format!("Failed to load households {}", households.display()))?;
            info!("Loaded {} households in {:?}", inputs.len(), start.elapsed());

            let plans = runner.run_batch(&inputs, resolve_date(as_of));

            println!("{:<16} {:>6} {:>9} {:>12} {:>11} {:>14}",
                "Household", "Goals", "Feasible", "Conditional", "Infeasible", "Unallocated");
            println!("{}", "-".repeat(73));
            for (input, plan) in inputs.iter().zip(&plans) {
                let s = plan.summary();
                println!("{:<16} {:>6} {:>9} {:>12} {:>11} {:>14.2}",
                    input.household_id, s.total_goals, s.feasible, s.conditionally_feasible,
                    s.not_feasible, s.monthly_unallocated);
            }
            println!("\nPlanned {} households in {:?}", plans.len(), start.elapsed());
        }
        Commands::Strategy { household, goal, as_of, assumptions } => {
            let calculator = StrategyCalculator::new(load_assumptions(assumptions.as_deref())?);
            let input = load_household(&household)
                .with_context(|| format!("Failed to load household {}", household.display()))?;
            let Some(target) = input.goals.iter().find(|g| g.id == goal) else {
                bail!("Goal {} not found in {}", goal, household.display());
            };

            let funding = target.effective_funding(&input.assets);
            match calculator.calculate_with_funding(target, funding, &input.profile, resolve_date(as_of)) {
                Some(strategy) => println!("{}", serde_json::to_string_pretty(&strategy)?),
                None => println!("Goal {} has no deadline; no strategy can be computed", target.id),
            }
        }
        Commands::Convert { amount, from, to, rates } => {
            let table = RateTable::from_csv_path(&rates)
                .with_context(|| format!("Failed to load rates {}", rates.display()))?;
            let from = CurrencyCode::parse(&from)?;
            let to = CurrencyCode::parse(&to)?;

            let converted = convert_or_literal(amount, &from, &to, &table);
            match converted.rate {
                Some(rate) => println!("{:.2} {} = {:.2} {} (rate {:.6})", amount, from, converted.amount, to, rate),
                None => println!("{:.2} {} (no rate path to {}; amount shown unconverted)", amount, from, to),
            }
        }
    }

    Ok(())
}

fn resolve_date(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
}

fn load_assumptions(dir: Option<&Path>) -> Result<Assumptions> {
    match dir {
        Some(path) => Assumptions::from_csv_path(path)
            .with_context(|| format!("Failed to load assumptions from {}", path.display())),
        None => Ok(Assumptions::default_planning()),
    }
}

fn print_plan(household_id: &str, plan: &PlanResult) {
    if !household_id.is_empty() {
        println!("Household: {}", household_id);
    }
    println!("Buckets (monthly):");
    for (label, bucket) in [
        ("Conservative", plan.buckets.conservative),
        ("Moderate", plan.buckets.moderate),
        ("Aggressive", plan.buckets.aggressive),
    ] {
        println!("  {:<13} total {:>10.2}  remaining {:>10.2}", label, bucket.total, bucket.remaining);
    }
    println!();

    println!("{:<20} {:<22} {:>7} {:>11} {:>11} {:>11}  {}",
        "Goal", "Status", "Months", "Required", "Funded", "Gap", "Buckets");
    println!("{}", "-".repeat(110));
    for assessment in &plan.goals {
        let f = &assessment.feasibility;
        println!("{:<20} {:<22} {:>7.1} {:>11.2} {:>11.2} {:>11.2}  {}",
            assessment.goal.name,
            f.status.as_str(),
            f.months_to_deadline,
            f.required_monthly,
            f.funded_amount,
            f.funding_gap,
            f.bucket_used.as_deref().unwrap_or("-"),
        );
        match assessment.category() {
            Some(category) => println!("    [{}] {}", category.as_str(), f.reason),
            None => println!("    {}", f.reason),
        }
        for issue in &f.timeline_issues {
            println!("    ! {}", issue);
        }
    }

    let summary = plan.summary();
    println!("\nSummary:");
    println!("  Goals: {} ({} feasible, {} conditional, {} not feasible)",
        summary.total_goals, summary.feasible, summary.conditionally_feasible, summary.not_feasible);
    println!("  Required: ${:.2}/month", summary.total_required_monthly);
    println!("  Funded:   ${:.2}/month", summary.total_funded_monthly);
    println!("  Unallocated: ${:.2}/month", summary.monthly_unallocated);
}

fn write_plan_csv(path: &Path, plan: &PlanResult) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create {}", path.display()))?;

    for assessment in &plan.goals {
        let f = &assessment.feasibility;
        let strategy = assessment.strategy.as_ref();
        writer.serialize(GoalRow {
            goal_id: &assessment.goal.id,
            name: &assessment.goal.name,
            status: f.status.as_str(),
            category: assessment.category().map_or("", |c| c.as_str()),
            months_to_deadline: f.months_to_deadline,
            required_monthly: f.required_monthly,
            funded_amount: f.funded_amount,
            funding_gap: f.funding_gap,
            bucket_used: f.bucket_used.as_deref().unwrap_or(""),
            future_value: strategy.map(|s| s.future_value),
            required_monthly_contribution: strategy.map(|s| s.required_monthly_contribution),
            reason: &f.reason,
        })?;
    }

    writer.flush()?;
    Ok(())
}
