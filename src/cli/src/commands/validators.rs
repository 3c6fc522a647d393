use bithoven_lex::EditDelta;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;

lazy_static! {
    static ref EDIT_REGEX: Regex = Regex::new(r"(?s)^(\d+):(\d+):(.*)$").unwrap();
}

pub fn validate_file_exists(path: &str) -> Result<String, String> {
    let p = Path::new(path);
    if !p.exists() {
        Err(format!("Path does not exist: {path}"))
    } else if !p.is_file() {
        Err(format!("Not a file: {path}"))
    } else {
        Ok(path.to_string())
    }
}

/// Parses `START:END:TEXT`. TEXT may use `\n`, `\r`, `\t` and `\\`.
pub fn validate_edit(edit: &str) -> Result<EditDelta, String> {
    let caps = EDIT_REGEX
        .captures(edit)
        .ok_or_else(|| "Edit must be in format START:END:TEXT".to_string())?;
    let start: usize = caps[1]
        .parse()
        .map_err(|e| format!("Invalid edit start: {e}"))?;
    let end: usize = caps[2]
        .parse()
        .map_err(|e| format!("Invalid edit end: {e}"))?;
    if start > end {
        return Err(format!("Edit start {start} is after end {end}"));
    }
    Ok(EditDelta::new(start, end, unescape(&caps[3])?))
}

fn unescape(text: &str) -> Result<String, String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => return Err(format!("Unknown escape '\\{other}' in edit text")),
            None => return Err("Edit text ends with a lone '\\'".to_string()),
        }
    }
    Ok(out)
}
