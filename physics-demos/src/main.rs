// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! physics-demos CLI - run the classroom demos headless

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use physics_demos::config::{DemoConfig, RunConfig, CONFIG_ENV_VAR};
use physics_demos::history::Quantity;
use physics_demos::report::{write_csv, RunReport};
use physics_demos::sweep::Sweep;
use physics_demos::{RunSummary, ScenarioConfig};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "physics-demos")]
#[command(about = "Fixed-step physics teaching demos", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the demos and their default parameters
    List,
    /// Run one demo to completion
    Run {
        /// Demo name (defaults to the one in the config file)
        demo: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
        /// Quantities to export (defaults to the demo's charts)
        #[arg(short, long, value_delimiter = ',')]
        series: Vec<Quantity>,
    },
    /// Run one demo once per value of a parameter
    Sweep {
        /// Demo name
        demo: String,
        #[command(flatten)]
        common: CommonArgs,
        /// Parameter to vary
        #[arg(long)]
        vary: String,
        /// Values to try, comma separated
        #[arg(long, value_delimiter = ',', required = true)]
        values: Vec<f64>,
        /// Output format (csv is not supported for sweeps)
        #[arg(short, long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
}

#[derive(clap::Args)]
struct CommonArgs {
    /// TOML config file
    #[arg(short, long, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
    /// Parameter override, `name=value`; may be repeated
    #[arg(short, long = "param", value_parser = parse_param)]
    params: Vec<(String, f64)>,
    /// Step budget
    #[arg(long)]
    max_steps: Option<u64>,
    /// Stop after this many simulated seconds
    #[arg(long)]
    duration: Option<f64>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
    Csv,
}

fn parse_param(arg: &str) -> Result<(String, f64), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", arg))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for '{}': {}", name, e))?;
    Ok((name.trim().to_string(), value))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => list(),
        Commands::Run {
            demo,
            common,
            format,
            series,
        } => run(demo.as_deref(), &common, format, &series),
        Commands::Sweep {
            demo,
            common,
            vary,
            values,
            format,
        } => sweep(&demo, &common, &vary, &values, format),
    }
}

/// Merge the config file, the demo name and the command-line overrides
fn resolve(demo: Option<&str>, common: &CommonArgs) -> Result<(ScenarioConfig, RunConfig)> {
    let file = match &common.config {
        Some(path) => Some(
            DemoConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        ),
        None => None,
    };

    let mut scenario = match (demo, &file) {
        (Some(name), Some(file)) if file.scenario.name() == name => file.scenario.clone(),
        (Some(name), file) => {
            if let Some(file) = file {
                warn!(
                    configured = file.scenario.name(),
                    requested = name,
                    "config file describes a different demo, using defaults"
                );
            }
            ScenarioConfig::from_name(name)?
        }
        (None, Some(file)) => file.scenario.clone(),
        (None, None) => bail!("no demo given; pass a demo name or --config"),
    };

    for (name, value) in &common.params {
        scenario.set_param(name, *value)?;
    }

    let mut run = file.map(|f| f.run).unwrap_or_default();
    if common.max_steps.is_some() {
        run.max_steps = common.max_steps;
    }
    if common.duration.is_some() {
        run.duration = common.duration;
    }

    debug!(demo = scenario.name(), ?run, "resolved configuration");
    Ok((scenario, run))
}

fn list() -> Result<()> {
    let mut out = io::stdout().lock();
    for name in ScenarioConfig::NAMES {
        let config = ScenarioConfig::from_name(name)?;
        let params: Vec<String> = config
            .params()
            .iter()
            .map(|(key, value)| format!("{}={}", key, value))
            .collect();
        let series: Vec<String> = config
            .chart_series()
            .iter()
            .map(|q| format!("{} [{}]", q, q.unit()))
            .collect();
        writeln!(out, "{:<16} {}", name, params.join(" "))?;
        writeln!(out, "{:<16} series: {}", "", series.join(", "))?;
    }
    Ok(())
}

fn run(demo: Option<&str>, common: &CommonArgs, format: Format, series: &[Quantity]) -> Result<()> {
    let (scenario, run) = resolve(demo, common)?;
    let quantities = if series.is_empty() {
        scenario.chart_series()
    } else {
        series
    };

    let mut simulation = run.build(&scenario)?;
    simulation
        .run_to_completion(run.max_steps())
        .with_context(|| format!("running {}", scenario.name()))?;

    let mut out = io::stdout().lock();
    match format {
        Format::Table => write_summary(&mut out, &simulation.summary())?,
        Format::Json => writeln!(out, "{}", RunReport::new(&simulation, quantities).to_json()?)?,
        Format::Csv => write_csv(&mut out, simulation.history(), quantities)?,
    }
    Ok(())
}

fn sweep(demo: &str, common: &CommonArgs, vary: &str, values: &[f64], format: Format) -> Result<()> {
    let (scenario, run) = resolve(Some(demo), common)?;
    let points = Sweep::new(&scenario, vary, values, run)?.run();

    let mut out = io::stdout().lock();
    match format {
        Format::Table => {
            for point in &points {
                match &point.outcome {
                    Ok(summary) => writeln!(
                        out,
                        "{}={:<10} {:<18} {}",
                        vary,
                        point.value,
                        summary
                            .stop_reason
                            .map(|r| r.to_string())
                            .unwrap_or_else(|| "running".to_string()),
                        summary.info
                    )?,
                    Err(err) => writeln!(out, "{}={:<10} error: {}", vary, point.value, err)?,
                }
            }
        }
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(&points)?)?,
        Format::Csv => bail!("csv output is only available for single runs"),
    }
    Ok(())
}

fn write_summary(out: &mut impl Write, summary: &RunSummary) -> io::Result<()> {
    writeln!(out, "demo         {}", summary.demo)?;
    writeln!(out, "steps        {}", summary.steps)?;
    writeln!(out, "elapsed      {:.3} s", summary.elapsed)?;
    if let Some(reason) = summary.stop_reason {
        writeln!(out, "stopped by   {}", reason)?;
    }
    writeln!(out, "bounces      {}", summary.bounces)?;
    writeln!(out, "peak height  {:.3} m", summary.peak_height)?;
    writeln!(out, "peak speed   {:.3} m/s", summary.peak_speed)?;
    writeln!(out, "{}", summary.info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_param() {
        assert_eq!(parse_param("angle=60"), Ok(("angle".to_string(), 60.0)));
        assert_eq!(parse_param(" dt = 0.005"), Ok(("dt".to_string(), 0.005)));
        assert!(parse_param("angle").is_err());
        assert!(parse_param("angle=steep").is_err());
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from([
            "physics-demos",
            "run",
            "projectile",
            "-p",
            "angle=30",
            "--series",
            "x,y,speed",
            "--format",
            "csv",
        ])
        .unwrap();
        match cli.command {
            Commands::Run {
                demo,
                common,
                format,
                series,
            } => {
                assert_eq!(demo.as_deref(), Some("projectile"));
                assert_eq!(common.params, vec![("angle".to_string(), 30.0)]);
                assert!(format == Format::Csv);
                assert_eq!(series, vec![Quantity::X, Quantity::Y, Quantity::Speed]);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_resolve_applies_overrides() {
        let common = CommonArgs {
            config: None,
            params: vec![("height".to_string(), 3.0)],
            max_steps: Some(500),
            duration: None,
        };
        let (scenario, run) = resolve(Some("free-fall"), &common).unwrap();
        assert!(scenario.params().contains(&("height", 3.0)));
        assert_eq!(run.max_steps(), 500);
        assert!(resolve(None, &common).is_err());
    }
}
