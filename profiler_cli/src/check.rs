//! `check`: validate a profile and describe its phases.

use profiler_config::Config;
use profiler_core::error::Result as CoreResult;
use profiler_core::{Phase, PhaseStopConditions};
use serde_json::{Value, json};

use crate::replay::{build_profiler, num};

fn stop_json(s: &PhaseStopConditions) -> Value {
    let mut obj = serde_json::Map::new();
    if s.time >= 0 {
        obj.insert("time_ms".into(), json!(s.time));
    }
    for (key, v) in [
        ("weight", s.weight),
        ("pressure_above", s.pressure_above),
        ("pressure_below", s.pressure_below),
        ("water_pumped_in_phase", s.water_pumped_in_phase),
        ("flow_above", s.flow_above),
        ("flow_below", s.flow_below),
    ] {
        if v > 0.0 {
            obj.insert(key.into(), json!(num(v)));
        }
    }
    Value::Object(obj)
}

fn phase_json(index: usize, p: &Phase) -> Value {
    json!({
        "index": index,
        "type": p.phase_type.as_str(),
        "target": {
            "start": num(p.target.start),
            "end": num(p.target.end),
            "curve": format!("{:?}", p.target.curve),
            "time_ms": p.transition_time(),
        },
        "restriction": num(p.restriction),
        "stop": stop_json(&p.stop_conditions),
        "open_ended": p.stop_conditions.is_open_ended(),
    })
}

fn describe_stop(s: &PhaseStopConditions) -> String {
    let v = stop_json(s);
    match v.as_object() {
        Some(m) if !m.is_empty() => m
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "none (global limits only)".to_string(),
    }
}

pub fn run_check(cfg: &Config, json_mode: bool) -> CoreResult<()> {
    let profiler = build_profiler(cfg)?;
    let phases = profiler.phases();
    let global = profiler.global_stop_conditions();

    let open_ended = phases
        .iter()
        .filter(|p| p.stop_conditions.is_open_ended())
        .count();
    if open_ended > 0 && global.weight <= 0.0 && global.time < 0 && global.water_pumped <= 0.0 {
        tracing::warn!(
            open_ended,
            "profile has phases with no stop condition and no global limit"
        );
    }

    if json_mode {
        let list: Vec<Value> = phases
            .iter()
            .enumerate()
            .map(|(i, p)| phase_json(i, p))
            .collect();
        println!(
            "{}",
            json!({
                "ok": true,
                "phases": list,
                "global_stop": {
                    "weight": num(global.weight),
                    "time_ms": global.time,
                    "water_pumped": num(global.water_pumped),
                },
            })
        );
    } else {
        println!("profile ok: {} phases", phases.count());
        for (i, p) in phases.iter().enumerate() {
            println!(
                "  #{i} {} {} -> {} ({:?}, {} ms) restriction {}; stop: {}",
                p.phase_type.as_str(),
                p.target.start,
                p.target.end,
                p.target.curve,
                p.transition_time(),
                p.restriction,
                describe_stop(&p.stop_conditions)
            );
        }
    }
    Ok(())
}
