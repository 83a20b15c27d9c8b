use clap::Parser;
use squadpilot::application::run::RunOptions;
use squadpilot::cli::commands::{Cli, Commands};
use squadpilot::config::{load_rules, AppConfig};
use squadpilot::domain::error::DomainError;
use squadpilot::domain::values::execution::{ExecutionMode, Outcome};
use squadpilot::domain::values::gameweek::Gameweek;
use squadpilot::infrastructure::reasoning::parse::parse_draft;
use squadpilot::SquadPilot;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXIT_ERROR: i32 = 1;
const EXIT_PARTIAL: i32 = 2;
const EXIT_REJECTED: i32 = 3;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let code = match run_command(cli.command).await {
        Ok(code) => code,
        Err(DomainError::Rejected(report)) => {
            eprintln!("Decision rejected: {report}");
            println!("{}", serde_json::to_string_pretty(&report).unwrap());
            EXIT_REJECTED
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    };
    std::process::exit(code);
}

async fn pilot(rules: Option<PathBuf>, decision_file: Option<PathBuf>) -> Result<SquadPilot, DomainError> {
    let config = AppConfig::from_env()?;
    let rules = load_rules(rules.as_deref())?;
    SquadPilot::new(&config, rules, decision_file).await
}

fn gameweek(gw: Option<u32>) -> Result<Option<Gameweek>, DomainError> {
    gw.map(Gameweek::new).transpose().map_err(DomainError::InvalidInput)
}

async fn run_command(cmd: Commands) -> Result<i32, DomainError> {
    match cmd {
        Commands::Run {
            apply,
            gw,
            decision_file,
            require_team,
            rules,
        } => {
            let sp = pilot(rules, decision_file).await?;
            let options = RunOptions {
                mode: if apply { ExecutionMode::Apply } else { ExecutionMode::DryRun },
                gameweek: gameweek(gw)?,
                require_team,
            };
            let report = sp.run(options).await?;
            println!("{}", report.summary);
            eprintln!("{}", serde_json::to_string_pretty(&report).unwrap());
            if apply && report.mode == ExecutionMode::DryRun {
                eprintln!("No authenticated session, nothing was submitted. Set FPL credentials to apply.");
            }

            let outcome = report.execution.as_ref().map(|e| e.outcome());
            Ok(match outcome {
                None | Some(Outcome::Applied) | Some(Outcome::Skipped) => 0,
                Some(Outcome::PartialSuccess) => {
                    eprintln!("Transfers were committed but the lineup was not applied; fix it manually.");
                    EXIT_PARTIAL
                }
                Some(Outcome::Ambiguous) => {
                    eprintln!("A transfer commit may or may not have been applied; check the team before re-running.");
                    EXIT_ERROR
                }
                Some(_) => EXIT_ERROR,
            })
        }
        Commands::Validate { file, gw, rules } => {
            let text = std::fs::read_to_string(&file)
                .map_err(|e| DomainError::NotFound(format!("{}: {e}", file.display())))?;
            let draft = parse_draft(&text)?;
            let sp = pilot(rules, None).await?;
            let validated = sp.validate(draft, gameweek(gw)?).await?;
            println!("{}", serde_json::to_string_pretty(&validated).unwrap());
            Ok(0)
        }
        Commands::Status { gw } => {
            let sp = pilot(None, None).await?;
            let status = sp.status(gameweek(gw)?).await?;
            println!("{}", serde_json::to_string_pretty(&status).unwrap());
            Ok(0)
        }
        Commands::Score { gw, limit } => {
            let sp = pilot(None, None).await?;
            let scores = sp.scores(gameweek(gw)?, limit).await?;
            println!("{}", serde_json::to_string_pretty(&scores).unwrap());
            Ok(0)
        }
    }
}
