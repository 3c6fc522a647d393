use crate::commands::shared::{ConfigArgs, OutputArgs, SourceArgs};
use crate::core::formatter::{get_formatter, TextLine};
use crate::core::logger::Logger;
use bithoven_lex::{tokenize, Token, TokenKind};
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
#[command(about = "Print the classified token stream")]
pub struct TokensArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[arg(long = "skip-whitespace", help = "Leave whitespace tokens out of the listing")]
    pub skip_whitespace: bool,
}

#[derive(Debug, Serialize)]
pub struct TokenView {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub lexeme: String,
}

impl From<Token> for TokenView {
    fn from(token: Token) -> Self {
        Self {
            kind: token.kind,
            start: token.start(),
            end: token.end(),
            lexeme: token.lexeme,
        }
    }
}

impl TextLine for TokenView {
    fn text_line(&self) -> String {
        format!("{}..{} {} {:?}", self.start, self.end, self.kind, self.lexeme)
    }
}

pub fn execute(args: &TokensArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = args.source.read()?;
    let config = args.config.load()?;

    let tokens = tokenize(&text, &config.keywords);
    Logger::debug(&format!(
        "{}: {} bytes, {} tokens",
        args.source.source,
        text.len(),
        tokens.len()
    ));

    let views: Vec<TokenView> = tokens
        .into_iter()
        .filter(|t| !(args.skip_whitespace && t.kind == TokenKind::Whitespace))
        .map(TokenView::from)
        .collect();

    let formatter = get_formatter(&args.output.output);
    print!("{}", formatter.format_list(&views, "No tokens"));
    Ok(())
}
