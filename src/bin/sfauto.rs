//! Command-line front end for scripted test-data setup.
//!
//! ```sh
//! export REST_ENDPOINT=/services/data API_VERSION=62.0 \
//!     GRANT_SERVICE='/services/oauth2/token?grant_type=password'
//! export DATA_SETUP_SF_ORG_USERNAME=... DATA_SETUP_SF_ORG_PASSWORD=... # etc.
//! sfauto query "SELECT Id, Name FROM Account LIMIT 5"
//! sfauto create Account '{"Name": "Acme"}'
//! sfauto insert-tree Account @accounts.json
//! sfauto run-batch NightlyCleanupBatch
//! ```
//!
//! JSON arguments are taken literally, or read from a file when prefixed
//! with `@`. Results are printed to stdout as JSON.

use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sfauto::rest::{CompositeGraphRequest, CompositeTreeRecord, RecordFields};
use sfauto::{authenticate, ApiSettings, Credential, SalesforceRestClient, ToolingClient};

/// Exit code when a job was started but did not complete.
const EXIT_JOB_INCOMPLETE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "sfauto",
    version,
    about = "Salesforce REST automation for test-data setup and job orchestration."
)]
struct Cli {
    /// Prefix of the org credential variables (`<PREFIX>_USERNAME`, `<PREFIX>_PASSWORD`, ...).
    #[arg(long, env = "SFAUTO_ORG", default_value = "DATA_SETUP_SF_ORG")]
    org: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a SOQL query and print every record, following pagination.
    Query { soql: String },

    /// Run a SOQL query restricted to the given record ids, 100 ids per request.
    QueryIds {
        /// Query without a WHERE clause, e.g. `SELECT Id, Name FROM Contact`.
        soql: String,
        ids: Vec<String>,
    },

    /// Create a record from a JSON object of fields.
    Create { sobject: String, fields: String },

    /// Fetch a record by id.
    Get { sobject: String, id: String },

    /// Update fields on a record.
    Update {
        sobject: String,
        id: String,
        fields: String,
    },

    /// Delete a record by id.
    Delete { sobject: String, id: String },

    /// Insert a JSON array of record trees with the composite tree API.
    InsertTree { sobject: String, records: String },

    /// Insert a composite graph request (`{"graphs": [...]}`).
    InsertGraph { request: String },

    /// Start a batch Apex class and wait for it to finish.
    RunBatch { job_name: String },

    /// Execute anonymous Apex.
    ExecuteAnonymous {
        body: String,

        /// Wait for the latest async job the script enqueues.
        #[arg(long)]
        wait: bool,
    },

    /// Send a plain-text email through the `emailSimple` action.
    Email {
        #[arg(long = "to", required = true)]
        to: Vec<String>,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env is fine; the variables may come from the environment.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    let settings = ApiSettings::from_env().context("invalid API settings")?;
    let credential = Credential::from_env(&cli.org)
        .with_context(|| format!("invalid credentials for org prefix {}", cli.org))?;

    let keys = authenticate(&settings, &credential)
        .await
        .context("authentication failed")?;
    info!(instance_url = %keys.instance_url(), "Authenticated");

    let rest = SalesforceRestClient::new(keys)?;
    run(cli.command, rest).await
}

/// Log filter from `SFAUTO_LOG`, then `RUST_LOG`, then `info`. Logs go to
/// stderr so stdout stays machine-readable.
fn init_tracing() {
    let filter = match std::env::var("SFAUTO_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(command: Command, rest: SalesforceRestClient) -> Result<ExitCode> {
    match command {
        Command::Query { soql } => {
            let records: Vec<Value> = rest.query_all(&soql).await?;
            print_json(&records)?;
        }
        Command::QueryIds { soql, ids } => {
            let records: Vec<Value> = rest.query_by_id_batch(&soql, &ids).await?;
            print_json(&records)?;
        }
        Command::Create { sobject, fields } => {
            let fields = parse_fields(&fields)?;
            print_json(&rest.create_record(&sobject, &fields).await?)?;
        }
        Command::Get { sobject, id } => {
            print_json(&rest.get_record(&sobject, &id).await?)?;
        }
        Command::Update {
            sobject,
            id,
            fields,
        } => {
            let fields = parse_fields(&fields)?;
            rest.edit_record(&sobject, &id, &fields).await?;
            print_json(&json!({"id": id, "updated": true}))?;
        }
        Command::Delete { sobject, id } => {
            rest.delete_record(&sobject, &id).await?;
            print_json(&json!({"id": id, "deleted": true}))?;
        }
        Command::InsertTree { sobject, records } => {
            let records: Vec<CompositeTreeRecord> = serde_json::from_value(read_json(&records)?)
                .context("records must be a JSON array of composite tree records")?;
            print_json(&rest.insert_multiple_records(&sobject, &records).await?)?;
        }
        Command::InsertGraph { request } => {
            let request: CompositeGraphRequest = serde_json::from_value(read_json(&request)?)
                .context("request must be a composite graph request")?;
            print_json(&rest.insert_via_graph(&request).await?)?;
        }
        Command::RunBatch { job_name } => {
            let completed = ToolingClient::from_rest(rest)
                .submit_batch_job(&job_name)
                .await?;
            return job_exit(&job_name, completed);
        }
        Command::ExecuteAnonymous { body, wait } => {
            let body = read_text(&body)?;
            let tooling = ToolingClient::from_rest(rest);
            if wait {
                let completed = tooling.execute_anonymous_script(&body).await?;
                return job_exit("anonymous script", completed);
            }
            print_json(&tooling.execute_anonymous(&body).await?)?;
        }
        Command::Email { to, subject, body } => {
            let results = rest.send_email(&to, &subject, &body).await;
            if results.is_none() {
                return Err(anyhow!("email was not sent; see the log for details"));
            }
            print_json(&results)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn job_exit(job: &str, completed: bool) -> Result<ExitCode> {
    print_json(&json!({"job": job, "completed": completed}))?;
    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_JOB_INCOMPLETE)
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The argument itself, or the contents of the file it names after `@`.
fn read_text(arg: &str) -> Result<String> {
    match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}")),
        None => Ok(arg.to_string()),
    }
}

fn read_json(arg: &str) -> Result<Value> {
    let text = read_text(arg)?;
    serde_json::from_str(&text).context("argument is not valid JSON")
}

fn parse_fields(arg: &str) -> Result<RecordFields> {
    RecordFields::try_from(read_json(arg)?)
        .map_err(|other| anyhow!("fields must be a JSON object, got {other}"))
}
