use crate::commands::shared::{ConfigArgs, OutputArgs};
use crate::core::formatter::{get_formatter, TextLine};
use bithoven_lex::TokenKind;
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
#[command(about = "List category tags and the keywords assigned to them")]
pub struct TagsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Serialize)]
pub struct TagView {
    pub kind: TokenKind,
    pub tag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl TextLine for TagView {
    fn text_line(&self) -> String {
        if self.keywords.is_empty() {
            self.tag.clone()
        } else {
            format!("{}: {}", self.tag, self.keywords.join(" "))
        }
    }
}

pub fn execute(args: &TagsArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.config.load()?;
    let mut groups = config.keywords.groups();

    let views: Vec<TagView> = config
        .tags
        .iter()
        .map(|(kind, tag)| TagView {
            kind,
            tag: tag.to_string(),
            keywords: groups
                .remove(&kind)
                .unwrap_or_default()
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
        .collect();

    let formatter = get_formatter(&args.output.output);
    print!("{}", formatter.format_list(&views, "No tags"));
    Ok(())
}
