use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use jobtrail::{load_config, AiClassifier, RunConfig, Runner, RunOutcome};

/// Track job applications from a mailbox export into a deduplicated CSV ledger.
#[derive(Debug, Parser)]
#[command(name = "jobtrail", version, about)]
struct Cli {
    /// Optional JSON config file; command-line flags override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// How many days back the mail source should look.
    #[arg(long)]
    days_back: Option<u32>,

    /// Path of the intermediate raw-email JSON file.
    #[arg(long)]
    emails: Option<PathBuf>,

    /// Path of the CSV ledger.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Emails per classification request (1-20 by convention).
    #[arg(long)]
    batch_size: Option<usize>,

    /// Reuse the existing emails file instead of fetching mail.
    #[arg(long)]
    skip_extraction: bool,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig, jobtrail::ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => RunConfig::default(),
        };

        if let Some(days_back) = self.days_back {
            config.days_back = days_back;
        }
        if let Some(emails) = self.emails {
            config.emails_path = emails;
        }
        if let Some(output) = self.output {
            config.ledger_path = output;
        }
        if let Some(batch_size) = self.batch_size {
            config.batch_size = batch_size;
        }
        if self.skip_extraction {
            config.skip_extraction = true;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let classifier = match AiClassifier::from_config(&config.classifier) {
        Ok(classifier) => classifier,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Starting jobtrail v{}", env!("CARGO_PKG_VERSION"));

    // Mail retrieval is delegated to an external exporter; this binary
    // always runs against the intermediate emails file.
    let runner = Runner::new(config);
    match runner.run(None, &classifier).await {
        Ok(outcome) => {
            print_outcome(&outcome);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn print_outcome(outcome: &RunOutcome) {
    println!(
        "Processed {} emails, {} job-related; {} rows created, {} updated, {} total.",
        outcome.emails_seen,
        outcome.job_related,
        outcome.rows_created,
        outcome.rows_updated,
        outcome.ledger_total
    );

    let summary = &outcome.summary;
    if summary.total == 0 {
        return;
    }

    println!("\nApplications by status:");
    for (status, count) in &summary.by_status {
        let label = if status.is_empty() { "(none)" } else { status };
        println!("  {:<24} {}", label, count);
    }

    if !summary.top_companies.is_empty() {
        println!("\nTop companies:");
        for (company, count) in &summary.top_companies {
            println!("  {:<24} {}", company, count);
        }
    }

    if !summary.high_confidence.is_empty() {
        println!("\nHigh-confidence applications:");
        for record in &summary.high_confidence {
            println!(
                "  {} / {} ({:.2})",
                record.company_name, record.job_title, record.confidence_score
            );
        }
    }

    if !summary.pending_actions.is_empty() {
        println!("\nPending next actions:");
        for record in &summary.pending_actions {
            println!(
                "  {} / {}: {}",
                record.company_name, record.job_title, record.next_action
            );
        }
    }
}
