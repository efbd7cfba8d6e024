use tracing::{info, instrument, warn};

use sfauto_client::security::{apex, soql};
use sfauto_client::{poll_until, Probe, QueryResult};

use crate::error::{Error, ErrorKind, Result};
use crate::types::{AsyncApexJob, AsyncJobStatus};

/// Label used in logs and errors for anonymous scripts.
const ANONYMOUS_JOB: &str = "anonymous script";

fn latest_job_query(filter: &str) -> String {
    format!("SELECT Status FROM AsyncApexJob WHERE {filter} ORDER BY CreatedDate DESC LIMIT 1")
}

fn submission_error(job: &str, err: Error) -> Error {
    let message = err.to_string();
    Error::with_source(
        ErrorKind::JobSubmission {
            job: job.to_string(),
            message,
        },
        err,
    )
}

impl super::ToolingClient {
    /// Start the batch Apex class `job_name` and wait for its latest
    /// `AsyncApexJob` to complete.
    ///
    /// Returns `true` once the job reports `Completed`, and `false` if no
    /// `Completed` status is seen before the polling schedule runs out. A
    /// failure to start the job is [`ErrorKind::JobSubmission`].
    #[instrument(skip(self))]
    pub async fn submit_batch_job(&self, job_name: &str) -> Result<bool> {
        if !apex::is_safe_class_name(job_name) {
            return Err(Error::new(ErrorKind::InvalidInput(format!(
                "invalid Apex class name: {job_name:?}"
            ))));
        }

        self.execute_anonymous(&format!("Database.executeBatch(new {job_name}());"))
            .await
            .map_err(|e| submission_error(job_name, e))?;
        info!("Batch job submitted");

        let class_id = self.apex_class_id(job_name).await?;
        let status_query = latest_job_query(&format!(
            "ApexClassId = '{}'",
            soql::escape_string(&class_id)
        ));
        self.await_job(job_name, &status_query).await
    }

    /// Run an anonymous Apex script and wait for the latest `ApexToken` job
    /// to complete. Same result contract as
    /// [`submit_batch_job`](Self::submit_batch_job).
    #[instrument(skip(self, anonymous_body))]
    pub async fn execute_anonymous_script(&self, anonymous_body: &str) -> Result<bool> {
        self.execute_anonymous(anonymous_body)
            .await
            .map_err(|e| submission_error(ANONYMOUS_JOB, e))?;
        info!("Anonymous script submitted");

        self.await_job(ANONYMOUS_JOB, &latest_job_query("JobType = 'ApexToken'"))
            .await
    }

    async fn apex_class_id(&self, class_name: &str) -> Result<String> {
        let id = match class_name.split_once('.') {
            Some((namespace, name)) => {
                let ids = self
                    .rest
                    .find_record_ids_by_fields(
                        "ApexClass",
                        &[("NamespacePrefix", namespace), ("Name", name)],
                    )
                    .await?;
                ids.into_iter().next().ok_or_else(|| {
                    Error::new(ErrorKind::InvalidInput(format!(
                        "no ApexClass named {class_name}"
                    )))
                })?
            }
            None => {
                self.rest
                    .find_record_id_by_field("ApexClass", "Name", class_name)
                    .await?
            }
        };
        Ok(id)
    }

    /// Poll `status_query` on the configured schedule until the job finishes.
    async fn await_job(&self, job: &str, status_query: &str) -> Result<bool> {
        let outcome = poll_until(&self.poll, |attempt| async move {
            self.latest_status(status_query)
                .await
                .map(|status| classify(job, attempt, status))
        })
        .await?;

        if !outcome.is_ready() {
            warn!(
                job,
                attempts = outcome.attempts,
                waited_secs = outcome.waited.as_secs(),
                "Job did not complete in the allotted time"
            );
        }
        Ok(outcome.is_ready())
    }

    async fn latest_status(&self, status_query: &str) -> Result<Option<AsyncJobStatus>> {
        let page: QueryResult<AsyncApexJob> = self.rest.query(status_query).await?;
        Ok(page.records.into_iter().next().map(|job| job.status))
    }
}

/// Only `Completed` ends the wait. The latest job row may still be a
/// previous run, so a failed or missing row is polled again.
fn classify(job: &str, attempt: u32, status: Option<AsyncJobStatus>) -> Probe<()> {
    match status {
        Some(AsyncJobStatus::Completed) => {
            info!(job, attempt, "Job completed");
            Probe::Ready(())
        }
        Some(status) if status.is_failure() => {
            warn!(job, attempt, ?status, "Latest job ended without completing, polling again");
            Probe::Pending
        }
        Some(status) => {
            info!(job, attempt, ?status, "Job still running");
            Probe::Pending
        }
        None => {
            info!(job, attempt, "No job status yet");
            Probe::Pending
        }
    }
}
