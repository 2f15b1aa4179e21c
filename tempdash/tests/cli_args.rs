//! CLI arg tests for tempdash, run against the built binary.
use std::process::Command;

fn run(args: &[&str]) -> (bool, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_tempdash"))
        .args(args)
        .output()
        .expect("run tempdash");
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    (output.status.success(), text)
}

#[test]
fn test_help_mentions_short_and_long_flags() {
    let (ok, text) = run(&["--help"]);
    assert!(ok, "tempdash --help did not succeed");
    assert!(
        text.contains("--interval")
            && text.contains("-i")
            && text.contains("--window")
            && text.contains("-w")
            && text.contains("--config"),
        "help text missing expected flags\n{text}"
    );
}

#[test]
fn test_flags_accepted_with_help() {
    let (ok, text) = run(&["-w", "9", "--interval", "2", "--help"]);
    assert!(ok);
    assert!(text.contains("Usage:"));
}

#[test]
fn test_invalid_values_fail() {
    let (ok, text) = run(&["--window", "lots"]);
    assert!(!ok);
    assert!(text.contains("invalid value for --window"), "{text}");

    let (ok, _) = run(&["http://example/ws"]);
    assert!(!ok);
}
