use crate::commands::validators;
use crate::core::error::{read_file, HlError};
use crate::core::formatter::OutputFormat;
use bithoven_lex::LexConfig;
use clap::Args;

#[derive(Debug, Args)]
pub struct OutputArgs {
    #[arg(
        short = 'o',
        long = "output",
        help = "Output format: text or json",
        default_value_t = OutputFormat::Text,
        value_enum,
        ignore_case = true
    )]
    pub output: OutputFormat,
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    #[arg(
        short = 's',
        long = "source",
        help = "Path to the .bithoven file",
        value_parser = validators::validate_file_exists
    )]
    pub source: String,
}

impl SourceArgs {
    pub fn read(&self) -> Result<String, HlError> {
        read_file(&self.source)
    }
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[arg(
        short = 'c',
        long = "config",
        help = "JSON file overriding keywords and category tags",
        value_parser = validators::validate_file_exists
    )]
    pub config: Option<String>,
}

impl ConfigArgs {
    pub fn load(&self) -> Result<LexConfig, HlError> {
        match &self.config {
            Some(path) => {
                crate::debug_log!("Loading lexer config from {path}");
                Ok(LexConfig::from_json(&read_file(path)?)?)
            }
            None => Ok(LexConfig::default()),
        }
    }
}
