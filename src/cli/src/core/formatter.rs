use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// One row of text output.
pub trait TextLine {
    fn text_line(&self) -> String;
}

pub struct Formatter {
    engine: OutputFormat,
}

impl Formatter {
    pub fn new(engine: OutputFormat) -> Self {
        Self { engine }
    }

    pub fn format_list<T: Serialize + TextLine>(&self, list: &[T], empty_msg: &str) -> String {
        match self.engine {
            OutputFormat::Text => {
                if list.is_empty() {
                    return format!("{empty_msg}\n");
                }
                let mut out = String::new();
                for item in list {
                    out.push_str(&item.text_line());
                    out.push('\n');
                }
                out
            }
            OutputFormat::Json => {
                let mut json =
                    serde_json::to_string_pretty(list).unwrap_or_else(|_| "[]".to_string());
                json.push('\n');
                json
            }
        }
    }
}

pub fn get_formatter(output_format: &OutputFormat) -> Formatter {
    Formatter::new(*output_format)
}
