use clap::{Args, Parser, Subcommand};
use loan_desk::config::AppConfig;
use loan_desk::error::AppError;
use loan_desk::loans::adapters::applications_from_path;
use loan_desk::loans::{
    CreditScorer, GatewayIdentityVerifier, IdentityRegistry, LoanApplication,
    LoanApplicationProcessor, LoanDecision, ScoreBureau,
};
use loan_desk::telemetry;
use serde_json::json;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Loan Desk",
    about = "Decide loan applications against the configured lending policy",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decide a single application read from a JSON file
    Decide(DecideArgs),
    /// Decide every application in a CSV batch file
    Batch(BatchArgs),
}

#[derive(Args, Debug)]
struct CollaboratorArgs {
    /// CSV of known identities (name,age,address)
    #[arg(long)]
    registry: PathBuf,
    /// CSV of bureau scores (name,address,score)
    #[arg(long)]
    bureau: PathBuf,
}

#[derive(Args, Debug)]
struct DecideArgs {
    /// JSON document describing the application
    #[arg(long)]
    application: PathBuf,
    #[command(flatten)]
    collaborators: CollaboratorArgs,
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// CSV of applications to decide
    #[arg(long)]
    applications: PathBuf,
    #[command(flatten)]
    collaborators: CollaboratorArgs,
}

type FileProcessor =
    LoanApplicationProcessor<GatewayIdentityVerifier<IdentityRegistry>, ScoreBureau>;

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    info!(?config.environment, policy = ?config.policy, "loan desk starting");

    match cli.command {
        Command::Decide(args) => run_decide(args, &config),
        Command::Batch(args) => run_batch(args, &config),
    }
}

fn build_processor(
    collaborators: &CollaboratorArgs,
    config: &AppConfig,
) -> Result<FileProcessor, AppError> {
    let registry = IdentityRegistry::from_path(&collaborators.registry)?;
    let bureau = ScoreBureau::from_path(&collaborators.bureau)?;
    Ok(LoanApplicationProcessor::with_policy(
        GatewayIdentityVerifier::new(registry),
        bureau,
        config.policy.clone(),
    ))
}

fn run_decide(args: DecideArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut processor = build_processor(&args.collaborators, config)?;
    let reader = BufReader::new(File::open(&args.application)?);
    let mut application: LoanApplication = serde_json::from_reader(reader)?;

    processor.process(&mut application)?;

    let report = json!({
        "id": application.id(),
        "decision": application.decision().label(),
        "summary": application.decision().summary(),
        "last_check_time": processor.verifier().last_check_time(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run_batch(args: BatchArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut processor = build_processor(&args.collaborators, config)?;
    let mut applications = applications_from_path(&args.applications)?;

    let mut accepted = 0usize;
    let mut declined = 0usize;
    let mut failed = 0usize;

    for application in &mut applications {
        match processor.process(application) {
            Ok(()) => {
                match application.decision() {
                    LoanDecision::Accepted => accepted += 1,
                    LoanDecision::Declined(_) => declined += 1,
                    LoanDecision::Undetermined => {}
                }
                println!(
                    "- {} ({}): {}",
                    application.id(),
                    application.name(),
                    application.decision().summary()
                );
            }
            Err(err) => {
                failed += 1;
                println!(
                    "- {} ({}): undetermined, {}",
                    application.id(),
                    application.name(),
                    err
                );
            }
        }
    }

    println!(
        "\n{} accepted, {} declined, {} undetermined ({} scoring calls)",
        accepted,
        declined,
        failed,
        processor.scorer().count()
    );
    Ok(())
}
