//! Helpers shared by the command implementations.

use std::process::ExitCode;

use alex_query::{QueryData, QueryResponse, QueryStatus};
use serde::Serialize;

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => {
            println!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: could not serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Finishes a dispatcher-backed command.
///
/// With `--json`, the whole response envelope is printed regardless of
/// status. Otherwise errors go to stderr and a successful payload is handed
/// to `render`.
pub fn finish(
    response: &QueryResponse,
    json: bool,
    render: impl FnOnce(&QueryData),
) -> ExitCode {
    if json {
        let code = print_json(response);
        return match response.status {
            QueryStatus::Success => code,
            QueryStatus::Error => ExitCode::FAILURE,
        };
    }

    match (&response.status, &response.data) {
        (QueryStatus::Error, _) => {
            eprintln!(
                "error: {}",
                response.error.as_deref().unwrap_or("operation failed")
            );
            ExitCode::FAILURE
        }
        (QueryStatus::Success, Some(data)) => {
            render(data);
            ExitCode::SUCCESS
        }
        (QueryStatus::Success, None) => ExitCode::SUCCESS,
    }
}
