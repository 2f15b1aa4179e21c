//! CLI tests for tempdash_agent (server)
use std::process::Command as StdCommand;
use std::time::Duration;

use assert_cmd::cargo::CommandCargoExt;
use assert_cmd::Command;

fn agent() -> Command {
    Command::cargo_bin("tempdash_agent").expect("binary exists")
}

#[test]
fn test_help_lists_flags() {
    let out = agent().arg("--help").assert().success().get_output().clone();
    let text = String::from_utf8_lossy(&out.stderr);
    assert!(text.contains("--port") && text.contains("-p") && text.contains("--interval"));
}

#[test]
fn test_port_short_long() {
    // Verify port flags are accepted by ensuring the process starts (then we kill quickly).
    let td = tempfile::tempdir().expect("tempdir");
    let cfg = td.path().join("config.json");

    for args in [["--port", "0"], ["-p", "0"]] {
        let mut child = StdCommand::cargo_bin("tempdash_agent")
            .expect("binary exists")
            .args(args)
            .arg("--config")
            .arg(&cfg)
            .spawn()
            .expect("spawn agent");
        // Give it a moment to bind
        std::thread::sleep(Duration::from_millis(150));
        assert!(
            child.try_wait().expect("poll agent").is_none(),
            "agent exited early with {args:?}"
        );
        let _ = child.kill();
        let _ = child.wait();
    }
}

#[test]
fn test_invalid_window_exits_nonzero() {
    let td = tempfile::tempdir().expect("tempdir");
    agent()
        .args(["-p", "0", "--window", "0", "--config"])
        .arg(td.path().join("config.json"))
        .assert()
        .failure();
}

#[test]
fn test_oversized_max_window_in_file_fails_cleanly() {
    let td = tempfile::tempdir().expect("tempdir");
    let cfg = td.path().join("config.json");
    std::fs::write(
        &cfg,
        r#"{"window_size": 1000000000000, "max_window_size": 1000000000000}"#,
    )
    .expect("write config");
    let out = agent()
        .args(["-p", "0", "--config"])
        .arg(&cfg)
        .timeout(Duration::from_secs(10))
        .assert()
        .failure()
        .get_output()
        .clone();
    let text = String::from_utf8_lossy(&out.stderr);
    assert!(text.contains("max_window_size"), "stderr: {text}");
}
