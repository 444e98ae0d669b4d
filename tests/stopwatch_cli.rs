use std::process::Command;

fn combined_output(output: &std::process::Output) -> String {
    let mut combined = String::new();
    combined.push_str(&String::from_utf8_lossy(&output.stdout));
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    combined
}

fn stopwatch_bin() -> &'static str {
    option_env!("CARGO_BIN_EXE_stopwatch").expect("stopwatch test binary not built")
}

#[test]
fn stopwatch_help_mentions_name() {
    let output = Command::new(stopwatch_bin())
        .arg("--help")
        .output()
        .expect("run stopwatch --help");
    assert!(output.status.success());
    assert!(combined_output(&output).contains("Stopwatch"));
}

#[test]
fn stopwatch_preview_prints_compact_clock() {
    let output = Command::new(stopwatch_bin())
        .args(["--preview", "--rows", "10", "--cols", "30"])
        .output()
        .expect("run stopwatch --preview");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 10);
    assert!(stdout.contains("0000:00:00"));
}

#[test]
fn stopwatch_preview_defaults_to_full_layout() {
    let output = Command::new(stopwatch_bin())
        .arg("--preview")
        .output()
        .expect("run stopwatch --preview");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.lines().count(), 25);
    assert!(stdout.contains("START-STOP WATCH"));
    assert!(stdout.contains("Previous values"));
}

#[test]
fn stopwatch_rejects_zero_rows() {
    let output = Command::new(stopwatch_bin())
        .args(["--preview", "--rows", "0"])
        .output()
        .expect("run stopwatch --preview --rows 0");
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("--rows"));
}

#[test]
fn stopwatch_doctor_prints_report() {
    let output = Command::new(stopwatch_bin())
        .arg("--doctor")
        .output()
        .expect("run stopwatch --doctor");
    assert!(output.status.success());
    let combined = combined_output(&output);
    assert!(combined.contains("Stopwatch Doctor"));
    assert!(combined.contains("history_file"));
}
