#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and shot-log parsing for the shot profiler.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Shot-log CSV loader enforces headers; rows become replay ticks.
use serde::Deserialize;
use std::io::Read;

/// Shot-log CSV schema, one row per control tick.
///
/// Expected headers:
/// time_ms,weight,weight_flow,smoothed_pump_flow,pump_flow,pressure,temperature,shot_weight,water_pumped
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ShotLogRow {
    pub time_ms: u64,
    pub weight: f32,
    pub weight_flow: f32,
    pub smoothed_pump_flow: f32,
    pub pump_flow: f32,
    pub pressure: f32,
    pub temperature: f32,
    pub shot_weight: f32,
    pub water_pumped: f32,
}

pub const SHOT_LOG_HEADERS: [&str; 9] = [
    "time_ms",
    "weight",
    "weight_flow",
    "smoothed_pump_flow",
    "pump_flow",
    "pressure",
    "temperature",
    "shot_weight",
    "water_pumped",
];

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Flow,
    #[default]
    Pressure,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CurveKind {
    EaseIn,
    EaseOut,
    EaseInOut,
    #[default]
    Linear,
    Instant,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TargetCfg {
    pub start: f32,
    pub end: f32,
    #[serde(default)]
    pub curve: CurveKind,
    /// Ramp length in ms; 0 (default) uses the phase stop time.
    #[serde(default)]
    pub time_ms: i64,
}

/// Phase stop thresholds. Omitted fields are inactive.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct StopCfg {
    /// Negative disables; 0 ends the phase on its first tick.
    pub time_ms: i64,
    pub weight: f32,
    pub pressure_above: f32,
    pub pressure_below: f32,
    pub water_pumped_in_phase: f32,
    pub flow_above: f32,
    pub flow_below: f32,
}

impl Default for StopCfg {
    fn default() -> Self {
        Self {
            time_ms: -1,
            weight: 0.0,
            pressure_above: 0.0,
            pressure_below: 0.0,
            water_pumped_in_phase: 0.0,
            flow_above: 0.0,
            flow_below: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct PhaseCfg {
    #[serde(rename = "type", default)]
    pub kind: PhaseKind,
    pub target: TargetCfg,
    #[serde(default)]
    pub restriction: f32,
    #[serde(default)]
    pub stop: StopCfg,
}

/// Whole-shot limits. Omitted fields are inactive.
#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct GlobalStopCfg {
    pub weight: f32,
    pub time_ms: i64,
    pub water_pumped: f32,
}

impl Default for GlobalStopCfg {
    fn default() -> Self {
        Self {
            weight: 0.0,
            time_ms: -1,
            water_pumped: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ReplayCfg {
    /// Hard cap on processed ticks; 0 means unlimited.
    pub max_ticks: u64,
    /// End the replay on the tick the shot finishes.
    pub stop_on_finish: bool,
}

impl Default for ReplayCfg {
    fn default() -> Self {
        Self {
            max_ticks: 0,
            stop_on_finish: true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub phases: Vec<PhaseCfg>,
    #[serde(default)]
    pub global_stop: GlobalStopCfg,
    #[serde(default)]
    pub logging: Logging,
    #[serde(default)]
    pub replay: ReplayCfg,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

fn ensure_finite(name: &str, v: f32) -> eyre::Result<()> {
    if !v.is_finite() {
        eyre::bail!("{name} must be a finite number");
    }
    Ok(())
}

impl Config {
    /// Structural checks only: the recipe itself is taken as authored.
    pub fn validate(&self) -> eyre::Result<()> {
        if self.phases.is_empty() {
            eyre::bail!("phases must contain at least one phase");
        }
        for (i, p) in self.phases.iter().enumerate() {
            ensure_finite(&format!("phases[{i}].target.start"), p.target.start)?;
            ensure_finite(&format!("phases[{i}].target.end"), p.target.end)?;
            ensure_finite(&format!("phases[{i}].restriction"), p.restriction)?;
            let s = &p.stop;
            for (field, v) in [
                ("weight", s.weight),
                ("pressure_above", s.pressure_above),
                ("pressure_below", s.pressure_below),
                ("water_pumped_in_phase", s.water_pumped_in_phase),
                ("flow_above", s.flow_above),
                ("flow_below", s.flow_below),
            ] {
                ensure_finite(&format!("phases[{i}].stop.{field}"), v)?;
            }
        }

        ensure_finite("global_stop.weight", self.global_stop.weight)?;
        ensure_finite("global_stop.water_pumped", self.global_stop.water_pumped)?;

        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got '{rot}'");
        }

        Ok(())
    }
}

/// Parse a shot log from any reader; headers must match `SHOT_LOG_HEADERS`.
pub fn parse_shot_log_csv<R: Read>(reader: R) -> eyre::Result<Vec<ShotLogRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read shot log headers: {}", e))?
        .clone();
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != SHOT_LOG_HEADERS {
        eyre::bail!(
            "shot log CSV must have headers '{}', got: {}",
            SHOT_LOG_HEADERS.join(","),
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<ShotLogRow>().enumerate() {
        match rec {
            Ok(row) => rows.push(row),
            Err(e) => {
                eyre::bail!("invalid shot log row {}: {}", idx + 2, e);
            }
        }
    }
    Ok(rows)
}

pub fn load_shot_log_csv(path: &std::path::Path) -> eyre::Result<Vec<ShotLogRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("open shot log CSV {:?}: {}", path, e))?;
    parse_shot_log_csv(file)
}
