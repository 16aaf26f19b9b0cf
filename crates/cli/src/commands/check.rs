use std::path::Path;

use crate::OutputFormat;

pub(crate) fn cmd_check(file: &Path, output: OutputFormat, quiet: bool) {
    match kpl_core::compile_file(file) {
        Ok(_) => match output {
            OutputFormat::Json => println!("{}", serde_json::json!({ "ok": true })),
            OutputFormat::Text => {
                if !quiet {
                    println!("ok");
                }
            }
        },
        Err(e) => super::fail(&e, output, quiet),
    }
}
