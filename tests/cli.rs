//! Binary-level checks for argument handling. None of these reach the network.

use std::process::Command;

fn nes_outage() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nes-outage"));
    // Point at a closed local port so an accidental fetch fails fast.
    cmd.env("NES_OUTAGE_API_URL", "http://127.0.0.1:9/events");
    cmd
}

#[test]
fn test_no_arguments_prints_usage_and_exits_1() {
    let output = nes_outage().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing event ID"), "{stderr}");
    assert!(stderr.contains("Usage: nes-outage <EVENT_ID>"), "{stderr}");
}

#[test]
fn test_non_numeric_argument_exits_1() {
    let output = nes_outage().arg("abc").output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid event ID: abc"), "{stderr}");
}

#[test]
fn test_unknown_flag_exits_1() {
    let output = nes_outage().arg("--bogus").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_0() {
    let output = nes_outage().arg("--help").output().unwrap();

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("EVENT_ID"), "{stdout}");
    assert!(stdout.contains("--health"), "{stdout}");
}
