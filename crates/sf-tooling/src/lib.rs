//! # sfauto-tooling
//!
//! Anonymous Apex execution and async job polling for test automation.
//!
//! ## Features
//!
//! - **Execute Anonymous** - Run Apex with compile and runtime failures as errors
//! - **Batch Jobs** - Start a batch class and wait for its `AsyncApexJob`
//! - **Anonymous Scripts** - Run a script and wait for the job it enqueues
//!
//! Waiting is bounded by a [`PollConfig`]; by default 29 probes with a
//! linearly growing delay (1 s, 2 s, ... 29 s).
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfauto_tooling::ToolingClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfauto_tooling::Error> {
//!     let client = ToolingClient::new(keys)?;
//!
//!     let result = client
//!         .execute_anonymous("System.debug('Hello World');")
//!         .await?;
//!     assert!(result.success);
//!
//!     let completed = client.submit_batch_job("NightlyCleanupBatch").await?;
//!     println!("batch completed: {completed}");
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::ToolingClient;
pub use error::{Error, ErrorKind, Result};
pub use types::*;

pub use sfauto_client::{AccessKeyPair, BackoffStrategy, ClientConfig, PollConfig};
