use std::path::Path;

use crate::OutputFormat;

pub(crate) fn cmd_compile(file: &Path, output: OutputFormat, quiet: bool) {
    match kpl_core::compile_file(file) {
        Ok(program) => match output {
            OutputFormat::Json => {
                let pretty = serde_json::to_string_pretty(&kpl_core::to_json(&program))
                    .unwrap_or_else(|e| format!("serialization error: {}", e));
                println!("{}", pretty);
            }
            OutputFormat::Text => {
                print!("{}", kpl_core::render_text(&program));
            }
        },
        Err(e) => super::fail(&e, output, quiet),
    }
}
