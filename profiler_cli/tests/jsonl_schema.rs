use assert_cmd::prelude::*;
use rstest::rstest;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::Command;
use tempfile::tempdir;

fn write_valid_config(dir: &tempfile::TempDir) -> PathBuf {
    let toml = r#"
[[phases]]
type = "pressure"
target = { start = 2.0, end = 9.0, curve = "linear", time_ms = 2000 }
stop = { time_ms = 3000 }

[[phases]]
type = "flow"
restriction = 9.0
target = { start = 2.0, end = 2.0 }
stop = { weight = 20.0 }
"#;
    let path = dir.path().join("cfg.toml");
    fs::write(&path, toml).unwrap();
    path
}

// 500 ms ticks, the cup gains 1 g per tick from 4 s on
fn write_shot_log(dir: &tempfile::TempDir) -> PathBuf {
    let path = dir.path().join("shot.csv");
    let mut f = fs::File::create(&path).unwrap();
    writeln!(
        f,
        "time_ms,weight,weight_flow,smoothed_pump_flow,pump_flow,pressure,temperature,shot_weight,water_pumped"
    )
    .unwrap();
    for i in 0..60u32 {
        let w = i.saturating_sub(8) as f32;
        writeln!(f, "{},{w},0.0,2.0,2.0,6.0,93.0,{w},{}", i * 500, i).unwrap();
    }
    path
}

fn run_json(args: &[&str]) -> (bool, String, String) {
    let dir = tempdir().unwrap();
    let cfg = write_valid_config(&dir);
    let log = write_shot_log(&dir);

    let mut cmd = Command::cargo_bin("profiler").unwrap();
    cmd.arg("--json")
        .arg("--log-level")
        .arg("error")
        .arg("--config")
        .arg(&cfg);
    for a in args {
        if *a == "{log}" {
            cmd.arg(&log);
        } else {
            cmd.arg(a);
        }
    }
    let out = cmd.output().unwrap();
    (
        out.status.success(),
        String::from_utf8_lossy(&out.stdout).to_string(),
        String::from_utf8_lossy(&out.stderr).to_string(),
    )
}

/// Validate the JSONL schema of every tick record and of the summary line.
#[rstest]
fn replay_records_schema() {
    let (ok, stdout, stderr) = run_json(&["replay", "--log", "{log}"]);
    assert!(ok, "replay failed: {stderr}");

    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid JSON line"))
        .collect();
    let (summary, records) = lines.split_last().expect("at least one line");

    for v in records {
        assert!(v.get("time_ms").and_then(|x| x.as_u64()).is_some());
        assert!(v.get("phase").and_then(|x| x.as_u64()).is_some());
        assert!(v.get("time_in_phase_ms").and_then(|x| x.as_u64()).is_some());
        assert!(v.get("target").and_then(|x| x.as_f64()).is_some());
        assert!(v.get("restriction").and_then(|x| x.as_f64()).is_some());
        assert!(v.get("finished").and_then(|x| x.as_bool()).is_some());
        let ty = v.get("type").and_then(|x| x.as_str()).unwrap_or("");
        assert!(ty == "flow" || ty == "pressure", "bad type {ty}");
        // Trigger is a string on boundary ticks, null otherwise
        match v.get("trigger") {
            Some(serde_json::Value::Null) | Some(serde_json::Value::String(_)) => {}
            other => panic!("unexpected trigger: {other:?}"),
        }
    }

    // Ramp midpoint: 2 -> 9 bar over 2 s, sampled at 1 s
    let mid = records.iter().find(|v| v["time_ms"] == 1000).unwrap();
    assert_eq!(mid["target"], 5.5);
    assert_eq!(mid["type"], "pressure");

    let boundary = records.iter().find(|v| v["time_ms"] == 3000).unwrap();
    assert_eq!(boundary["phase"], 1);
    assert_eq!(boundary["trigger"], "time");
    assert_eq!(boundary["time_in_phase_ms"], 0);

    let last = records.last().unwrap();
    assert_eq!(last["finished"], true);
    assert_eq!(last["trigger"], "weight");

    let s = &summary["summary"];
    assert_eq!(s["finished"], true);
    assert_eq!(s["final_phase"], 1);
    assert_eq!(s["ticks"].as_u64(), Some(records.len() as u64));
    let triggers: Vec<&str> = s["transitions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["trigger"].as_str().unwrap())
        .collect();
    assert_eq!(triggers, ["time", "weight"]);
}

/// Errors become a single JSON object on stderr when --json is set.
#[rstest]
fn json_error_schema() {
    let (ok, _stdout, stderr) = run_json(&["replay", "--log", "missing.csv"]);
    assert!(!ok);
    let line = stderr
        .lines()
        .find(|l| l.contains("\"reason\""))
        .unwrap_or("")
        .to_string();
    assert!(!line.is_empty(), "no JSON error line; stderr was: {stderr}");
    let v: serde_json::Value = serde_json::from_str(&line).expect("valid JSON");
    assert!(v.get("reason").and_then(|x| x.as_str()).is_some());
    assert_eq!(v.get("exit_code").and_then(|x| x.as_i64()), Some(1));
    assert!(v.get("message").and_then(|x| x.as_str()).is_some());
}

#[rstest]
fn check_lists_phases_as_json() {
    let (ok, stdout, stderr) = run_json(&["check"]);
    assert!(ok, "check failed: {stderr}");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("valid JSON");
    assert_eq!(v["ok"], true);
    let phases = v["phases"].as_array().unwrap();
    assert_eq!(phases.len(), 2);
    assert_eq!(phases[0]["type"], "pressure");
    assert_eq!(phases[0]["stop"]["time_ms"], 3000);
    assert_eq!(phases[1]["restriction"], 9.0);
    assert_eq!(phases[1]["stop"]["weight"], 20.0);
    assert_eq!(v["global_stop"]["time_ms"], -1);
}
