mod annotation;
mod field_store;
mod host;
mod jni;
mod observers;
mod report;
mod session;
mod signature;
mod taint_catalog;
mod telemetry;
#[cfg(test)]
mod test_harness;
mod trace;
mod value;

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use opentelemetry::{Context as OtelContext, KeyValue};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::report::{
    InvocationStats, ReplayedTrace, artifacts, build_invocation, build_sarif, sarif_results,
};
use crate::session::{dispatch_debug_enabled, emit_dispatch_summary_event};
use crate::taint_catalog::TaintOracle;
use crate::telemetry::{Telemetry, current_trace_id, init_logging, with_span, with_span_under};
use crate::trace::{load_trace, replay};

/// CLI arguments for jnitaint execution.
#[derive(Parser, Debug)]
#[command(
    name = "jnitaint",
    about = "Replay native JNI call traces through a taint model and report SARIF.",
    version
)]
struct Cli {
    /// JSON trace of one native execution path; repeatable.
    #[arg(long = "trace", value_name = "PATH", required = true)]
    traces: Vec<PathBuf>,
    /// Taint source/sink catalog.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// SARIF output path; `-` or absent writes to stdout.
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// OTLP/HTTP collector endpoint.
    #[arg(long, value_name = "URL")]
    otel: Option<String>,
    #[arg(long)]
    quiet: bool,
    #[arg(long)]
    timing: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();
    let telemetry = cli.otel.as_deref().map(Telemetry::new).transpose()?;
    let result = with_span(
        telemetry.as_ref(),
        "jnitaint.run",
        &[KeyValue::new("jnitaint.trace_count", cli.traces.len() as i64)],
        || run(&cli, telemetry.as_ref()),
    );
    if let Some(telemetry) = &telemetry {
        telemetry.shutdown()?;
    }
    result
}

fn run(cli: &Cli, telemetry: Option<&Telemetry>) -> Result<()> {
    for path in &cli.traces {
        if !path.exists() {
            anyhow::bail!("trace not found: {}", path.display());
        }
    }
    let oracle = match &cli.catalog {
        Some(path) => TaintOracle::load(path)?,
        None => TaintOracle::empty(),
    };
    info!("taint catalog: {} entries", oracle.len());

    let started_at = Instant::now();
    let parent_cx = OtelContext::current();
    let traces = cli
        .traces
        .par_iter()
        .map(|path| {
            let attributes = [KeyValue::new(
                "jnitaint.trace",
                path.display().to_string(),
            )];
            with_span_under(telemetry, "jnitaint.replay", &attributes, &parent_cx, || {
                replay_file(path, &oracle)
            })
        })
        .collect::<Result<Vec<_>>>()?;
    let replay_duration_ms = started_at.elapsed().as_millis();

    let mut stats = InvocationStats::from_traces(&traces, oracle.len());
    stats.replay_duration_ms = replay_duration_ms;
    stats.trace_id = current_trace_id();
    let invocation = build_invocation(&stats);
    let sarif = build_sarif(artifacts(&traces), invocation, sarif_results(&traces));

    let mut writer = output_writer(cli.output.as_deref())?;
    serde_json::to_writer_pretty(&mut writer, &sarif)
        .context("failed to serialize SARIF output")?;
    writer
        .write_all(b"\n")
        .context("failed to write SARIF output")?;

    if cli.timing && !cli.quiet {
        eprintln!(
            "timing: total_ms={} traces={} calls={} fallbacks={} aborted={}",
            replay_duration_ms,
            stats.trace_count,
            stats.coverage.total(),
            stats.coverage.fallback,
            stats.aborted.len()
        );
    }

    Ok(())
}

fn replay_file(path: &Path, oracle: &TaintOracle) -> Result<ReplayedTrace> {
    let length = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();
    let trace = load_trace(path)?;
    let outcome =
        replay(&trace, oracle).with_context(|| format!("failed to replay {}", path.display()))?;
    let uri = path.display().to_string();
    debug!(
        "{uri}: {} calls, {} bindings",
        outcome.report.coverage.total(),
        outcome.bindings.len()
    );
    if dispatch_debug_enabled() {
        emit_dispatch_summary_event(&uri, &outcome.report);
    }
    Ok(ReplayedTrace {
        uri,
        length,
        outcome,
    })
}

fn output_writer(output: Option<&Path>) -> Result<Box<dyn Write>> {
    match output {
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdout())),
        Some(path) => Ok(Box::new(
            File::create(path).with_context(|| format!("failed to open {}", path.display()))?,
        )),
        None => Ok(Box::new(io::stdout())),
    }
}
