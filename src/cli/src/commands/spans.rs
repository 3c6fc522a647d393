use crate::commands::shared::{ConfigArgs, OutputArgs, SourceArgs};
use crate::commands::validators;
use crate::core::error::{read_file, HlError};
use crate::core::formatter::{get_formatter, TextLine};
use crate::core::logger::Logger;
use crate::debug_log;
use bithoven_lex::{build_spans, Document, EditDelta, HostChange, RelexStats, TokenCache};
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Args)]
#[command(about = "Print decoration spans, optionally after replaying edits")]
pub struct SpansArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[arg(
        short = 'e',
        long = "edit",
        help = "Edit to apply before printing, as START:END:TEXT (repeatable, applied in order)",
        value_parser = validators::validate_edit
    )]
    pub edits: Vec<EditDelta>,

    #[arg(
        long = "changes",
        help = "JSON file with a host change batch applied after the edits",
        value_parser = validators::validate_file_exists
    )]
    pub changes: Option<String>,

    #[arg(
        long = "verify",
        help = "Fail if the incremental tokens or spans differ from a full rescan"
    )]
    pub verify: bool,
}

#[derive(Debug, Serialize)]
pub struct SpanView {
    pub start: usize,
    pub end: usize,
    pub tag: String,
    #[serde(skip)]
    pub text: String,
}

impl TextLine for SpanView {
    fn text_line(&self) -> String {
        format!("{}..{} {} {:?}", self.start, self.end, self.tag, self.text)
    }
}

fn log_stats(label: &str, stats: &RelexStats) {
    debug_log!(
        "{label}: replaced {}..{} with {}..{}, rescanned {}, reused {}, resynced {}",
        stats.restart,
        stats.old_end,
        stats.restart,
        stats.new_end,
        stats.rescanned,
        stats.reused,
        stats.resynced
    );
}

pub fn execute(args: &SpansArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = args.source.read()?;
    let config = Arc::new(args.config.load()?);
    let mut doc = Document::open(text, Arc::clone(&config));
    Logger::debug(&format!(
        "Opened {} ({} tokens)",
        args.source.source,
        doc.tokens().len()
    ));

    for (i, edit) in args.edits.iter().enumerate() {
        let stats = doc.apply_edit(edit.clone()).map_err(HlError::from)?;
        log_stats(&format!("edit {}", i + 1), &stats);
    }

    if let Some(path) = &args.changes {
        let changes: Vec<HostChange> =
            serde_json::from_str(&read_file(path)?).map_err(HlError::from)?;
        let stats = doc.apply_host_changes(&changes).map_err(HlError::from)?;
        log_stats(&format!("{} host changes", changes.len()), &stats);
    }

    if args.verify {
        let full = TokenCache::build(doc.text(), &config);
        if let Some(i) = full
            .tokens()
            .iter()
            .zip(doc.tokens())
            .position(|(a, b)| a != b)
        {
            return Err(HlError::Mismatch(format!("tokens differ at index {i}")).into());
        }
        if full.tokens().len() != doc.tokens().len() {
            return Err(HlError::Mismatch(format!(
                "{} tokens from full rescan, {} incrementally",
                full.tokens().len(),
                doc.tokens().len()
            ))
            .into());
        }
        if doc.spans() != build_spans(full.tokens(), &config.tags) {
            return Err(HlError::Mismatch("spans differ from a full rebuild".to_string()).into());
        }
        Logger::debug("Incremental tokens and spans match a full rescan");
    }

    let views: Vec<SpanView> = doc
        .spans()
        .iter()
        .map(|span| SpanView {
            start: span.start,
            end: span.end,
            tag: span.tag.clone(),
            text: doc.text()[span.start..span.end].to_string(),
        })
        .collect();

    let formatter = get_formatter(&args.output.output);
    print!("{}", formatter.format_list(&views, "No spans"));
    Ok(())
}
