//! aernctl - CLI for the AERN emergency response daemon.

mod client;
mod display;

use aern_common::{EmergencyReport, Severity, DEFAULT_API_ADDR};
use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use client::AernClient;

#[derive(Parser)]
#[command(name = "aernctl", version, about = "Control the AERN emergency response daemon")]
struct Cli {
    /// Daemon address
    #[arg(long, default_value_t = format!("http://{}", DEFAULT_API_ADDR))]
    addr: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit an emergency report
    Report {
        /// Kind of incident (fire, flood, medical, ...)
        #[arg(long = "type")]
        incident_type: String,

        #[arg(long)]
        location: String,

        #[arg(long)]
        description: String,

        #[arg(long, value_enum)]
        severity: SeverityArg,

        /// Callback contact for responders
        #[arg(long)]
        contact: Option<String>,
    },

    /// Show a stored incident
    Incident { id: String },

    /// List tracked incidents
    List,

    /// Update an incident's status (ACTIVE, IN_PROGRESS, RESOLVED, CANCELLED)
    Status { id: String, status: String },

    /// Merge a JSON object of new details into an incident and re-run analysis
    Update { id: String, details: String },

    /// Daemon health
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum SeverityArg {
    Low,
    Medium,
    High,
    Critical,
}

impl From<SeverityArg> for Severity {
    fn from(arg: SeverityArg) -> Self {
        match arg {
            SeverityArg::Low => Severity::Low,
            SeverityArg::Medium => Severity::Medium,
            SeverityArg::High => Severity::High,
            SeverityArg::Critical => Severity::Critical,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = AernClient::new(cli.addr.clone());

    match cli.command {
        Command::Report {
            incident_type,
            location,
            description,
            severity,
            contact,
        } => {
            let report = EmergencyReport {
                incident_type,
                location,
                description,
                severity: severity.into(),
                timestamp: None,
                contact_info: contact,
                additional_details: None,
            };
            let response = client.submit_report(&report).await?;
            display::print_emergency_response(&response);
        }

        Command::Incident { id } => {
            display::print_incident(&client.incident(&id).await?);
        }

        Command::List => {
            display::print_listing(&client.active_incidents().await?);
        }

        Command::Status { id, status } => {
            let updated = client.update_status(&id, &status).await?;
            println!(
                "{} -> {}",
                updated.incident_id,
                display::status_label(updated.status)
            );
        }

        Command::Update { id, details } => {
            let details: serde_json::Map<String, serde_json::Value> =
                serde_json::from_str(&details)
                    .map_err(|e| anyhow!("Details must be a JSON object: {}", e))?;
            let incident = client.update_analysis(&id, &details).await?;
            display::print_incident(&incident);
        }

        Command::Health => {
            display::print_health(&client.health().await?);
        }
    }

    Ok(())
}
