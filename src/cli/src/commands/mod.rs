pub mod shared;
pub mod spans;
pub mod tags;
pub mod tokens;
pub mod validators;

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    Tokens(tokens::TokensArgs),
    Spans(spans::SpansArgs),
    Tags(tags::TagsArgs),
}
