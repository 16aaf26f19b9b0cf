pub(crate) mod check;
pub(crate) mod compile;
pub(crate) mod tokens;

use crate::OutputFormat;
use kpl_core::CompileError;
use std::process;

/// Print the single fatal diagnostic and terminate with a failing status.
/// Compilation never continues past the first error.
pub(crate) fn fail(e: &CompileError, output: OutputFormat, quiet: bool) -> ! {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| format!("{:?}", e));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{}", e);
            }
        }
    }
    process::exit(1);
}
