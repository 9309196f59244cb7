pub(crate) mod check;
pub(crate) mod compile;
pub(crate) mod decode;
pub(crate) mod fetch;
pub(crate) mod locale;
pub(crate) mod status;
pub(crate) mod update;

use std::future::Future;

use crate::error::CliError;

/// Run one async command to completion on a fresh runtime.
pub(crate) fn run_async<T>(
    task: impl Future<Output = Result<T, CliError>>,
) -> Result<T, CliError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))?;
    rt.block_on(task)
}
