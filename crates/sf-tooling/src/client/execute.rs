use tracing::{debug, instrument};

use crate::error::{Error, ErrorKind, Result};
use crate::types::ExecuteAnonymousResult;

impl super::ToolingClient {
    /// Execute anonymous Apex code.
    ///
    /// A compile failure is [`ErrorKind::ApexCompilation`], an uncaught
    /// exception [`ErrorKind::ApexExecution`].
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let result = client.execute_anonymous("System.debug('Hello World');").await?;
    /// assert!(result.success);
    /// ```
    #[instrument(skip(self, apex_code), fields(len = apex_code.len()))]
    pub async fn execute_anonymous(&self, apex_code: &str) -> Result<ExecuteAnonymousResult> {
        let client = self.inner();
        let url = client.rest_url("tooling/executeAnonymous/");
        let request = client.get(&url).query("anonymousBody", apex_code);

        let result: ExecuteAnonymousResult = client.execute(request).await?.json().await?;

        if !result.compiled {
            let problem = result
                .compile_problem
                .clone()
                .unwrap_or_else(|| "code did not compile".to_string());
            return Err(Error::new(ErrorKind::ApexCompilation(match result.line {
                Some(line) if line > 0 => format!("line {line}: {problem}"),
                _ => problem,
            })));
        }

        if !result.success {
            let message = result
                .exception_message
                .clone()
                .unwrap_or_else(|| "execution failed".to_string());
            return Err(Error::new(ErrorKind::ApexExecution(message)));
        }

        debug!("Anonymous Apex executed");
        Ok(result)
    }
}
