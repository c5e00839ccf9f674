//! Output formatting of flat configuration for the command line.

use crate::env::FlatMap;

/// Output format for exported variables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `KEY=value` lines, as in a `.env` file
    #[default]
    Env,
    /// `export KEY='value'` lines for `eval` in a POSIX shell
    Shell,
    /// A single JSON object
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "env" | "dotenv" => Ok(OutputFormat::Env),
            "shell" | "sh" => Ok(OutputFormat::Shell),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format '{}'. Valid options: env, shell, json",
                s
            )),
        }
    }
}

/// Format variables in the given output format. Keys are emitted sorted.
pub fn format_vars(vars: &FlatMap, format: OutputFormat) -> String {
    match format {
        OutputFormat::Env => format_env(vars),
        OutputFormat::Shell => format_shell(vars),
        OutputFormat::Json => format_json(vars),
    }
}

/// Format as `KEY=value` lines. Values are written as-is.
pub fn format_env(vars: &FlatMap) -> String {
    let mut out = String::new();
    for (key, value) in vars {
        out.push_str(&format!("{}={}\n", key, value));
    }
    out
}

/// Format as `export KEY='value'` lines.
pub fn format_shell(vars: &FlatMap) -> String {
    let mut out = String::new();
    for (key, value) in vars {
        out.push_str(&format!("export {}={}\n", key, shell_quote(value)));
    }
    out
}

/// Format as a pretty-printed JSON object.
pub fn format_json(vars: &FlatMap) -> String {
    let mut out = serde_json::to_string_pretty(vars).unwrap_or_else(|_| "{}".to_string());
    out.push('\n');
    out
}

/// Single-quote `value` for a POSIX shell.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
