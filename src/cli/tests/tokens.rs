mod common;
use common::{run_bhl, validate_json_output};
use std::fs;
use std::path::Path;

#[test]
fn test_tokens_json() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bhl(&[
        "tokens",
        "-s",
        "tests/spans/input/comment.bithoven",
        "-o",
        "json",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    validate_json_output(&stdout, Path::new("tests/tokens/expected/comment.json"))?;
    Ok(())
}

#[test]
fn test_tokens_text_skip_whitespace() -> Result<(), Box<dyn std::error::Error>> {
    let output = run_bhl(&[
        "tokens",
        "--skip-whitespace",
        "-s",
        "tests/spans/input/unterminated_string.bithoven",
    ]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let expected = fs::read_to_string("tests/tokens/expected/unterminated_string.txt")?;
    assert_eq!(stdout.trim(), expected.trim());
    Ok(())
}

#[test]
fn test_tokens_debug_goes_to_stderr() {
    let output = run_bhl(&["tokens", "-d", "-s", "tests/spans/input/comment.bithoven"]);
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("[debug] tests/spans/input/comment.bithoven: 17 bytes, 6 tokens"),
        "stderr: {stderr}"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("[debug]"));
}

#[test]
fn test_tokens_rejects_unknown_config_key() {
    let dir = std::env::temp_dir().join("bhl_tokens_bad_config");
    fs::create_dir_all(&dir).unwrap();
    let config = dir.join("config.json");
    fs::write(&config, r#"{ "colors": {} }"#).unwrap();

    let output = run_bhl(&[
        "tokens",
        "-s",
        "tests/spans/input/comment.bithoven",
        "-c",
        config.to_str().unwrap(),
    ]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.starts_with("Error: Config error:"), "stderr: {stderr}");
}
