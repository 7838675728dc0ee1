use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use plannr::cli::{Cli, Commands};
use plannr::config::GlobalConfig;
use plannr::domain::{Milestone, ProgressStatus};
use plannr::engine::StallUrgency;
use plannr::planner::{OpenRouterGenerator, RepairOutcome};
use plannr::service::PlanService;
use plannr::storage::JsonProjectStore;

fn setup_logging() -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plannr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("plannr.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn build_service(cli: &Cli, config: &GlobalConfig) -> Result<PlanService> {
    let store = Arc::new(
        JsonProjectStore::new(config.storage_dir()).context("Failed to open project store")?,
    );

    let needs_generator = matches!(
        cli.command,
        Commands::Schedule { generate: true } | Commands::Replan { .. }
    );

    if needs_generator {
        let generator = OpenRouterGenerator::new(config.generator_config())
            .context("Failed to create plan generator")?;
        Ok(PlanService::with_generator(store, Arc::new(generator)))
    } else {
        Ok(PlanService::new(store))
    }
}

fn load_blueprint(path: &PathBuf) -> Result<Vec<Milestone>> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read blueprint {}", path.display()))?;

    // Accept either a bare milestone array or a {"milestones": [...]} document
    #[derive(serde::Deserialize)]
    struct Wrapper {
        milestones: Vec<Milestone>,
    }

    if let Ok(wrapper) = serde_json::from_str::<Wrapper>(&content) {
        return Ok(wrapper.milestones);
    }
    serde_json::from_str(&content).context("Blueprint is not a milestone list")
}

fn report_outcome(outcome: &RepairOutcome) {
    println!(
        "Schedule generated in {} attempt(s), completing {}",
        outcome.attempts,
        outcome.schedule.predicted_completion.to_string().cyan()
    );
    if !outcome.is_valid() {
        println!(
            "{}",
            "Warning: the schedule still has unresolved issues:".yellow()
        );
        for violation in &outcome.violations {
            println!("  - {}", violation);
        }
    }
}

async fn run_application(cli: &Cli, config: &GlobalConfig, today: NaiveDate) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    let service = build_service(cli, config)?;
    let user = cli.user.as_str();

    match &cli.command {
        Commands::New {
            goal,
            deadline,
            blueprint,
        } => {
            let milestones = match blueprint {
                Some(path) => load_blueprint(path)?,
                None => Vec::new(),
            };
            let project = service.create_project(
                user,
                goal,
                *deadline,
                milestones,
                config.availability.clone(),
            )?;
            println!("{} {}", "Created project:".green(), project.id);
        }
        Commands::Schedule { generate } => {
            if *generate {
                let outcome = service.schedule_generative(user, today).await?;
                report_outcome(&outcome);
            } else {
                let schedule = service.schedule(user, today)?;
                println!(
                    "{} {} task(s), completing {}",
                    "Scheduled:".green(),
                    schedule.scheduled_tasks.len(),
                    schedule.predicted_completion.to_string().cyan()
                );
                if schedule.deadline_violation {
                    println!("{}", "Warning: predicted completion misses the deadline".yellow());
                }
            }
        }
        Commands::Replan { instruction } => {
            let outcome = service
                .replan(user, instruction.as_deref().unwrap_or(""), today)
                .await?;
            report_outcome(&outcome);
        }
        Commands::Status => {
            let status = service.status(user, today)?;
            println!("{} {}", "Goal:".green(), status.project.goal);
            if let Some(deadline) = status.project.deadline {
                println!("{} {}", "Deadline:".green(), deadline);
            }
            match (&status.stalled_task_id, status.stall_urgency) {
                (Some(task_id), Some(StallUrgency::Late)) => {
                    println!("{} {} is overdue", "Stalled:".red(), task_id);
                }
                (Some(task_id), _) => {
                    println!("{} {} is due today", "Due:".yellow(), task_id);
                }
                _ => println!("{}", "On track".green()),
            }
        }
        Commands::Show => {
            let status = service.status(user, today)?;
            match status.project.schedule {
                Some(schedule) => {
                    for st in schedule.by_date() {
                        println!("{}  {}  ({}h)", st.date, st.task_id, st.estimate_hours);
                    }
                    println!(
                        "{} {}",
                        "Predicted completion:".green(),
                        schedule.predicted_completion
                    );
                }
                None => println!("{}", "No schedule yet; run `plannr schedule`".yellow()),
            }
        }
        Commands::Done { task_id } => {
            service.record_progress(user, task_id, ProgressStatus::Done, today)?;
            println!("{} {}", "Completed:".green(), task_id);
        }
        Commands::Skip { task_id } => {
            service.record_progress(user, task_id, ProgressStatus::Skipped, today)?;
            println!("{} {}", "Skipped:".yellow(), task_id);
            println!("Run `plannr replan` to reflow the remaining tasks");
        }
        Commands::Undo { task_id } => {
            if service.undo_completion(user, task_id)? {
                println!("{} {}", "Unmarked:".green(), task_id);
            } else {
                println!("{} {} had no completion to undo", "Note:".yellow(), task_id);
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();

    let config = GlobalConfig::load(cli.config.as_ref()).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    let today = Local::now().date_naive();
    run_application(&cli, &config, today)
        .await
        .context("Application failed")?;

    Ok(())
}
