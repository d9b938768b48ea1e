//! Replay command implementation

use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, ValueEnum};

use crate::config::EngineConfig;
use crate::engine::{AlphaRsiEngine, EngineOutput};
use crate::feed::PriceSeries;
use crate::signal::ReversalState;
use crate::telemetry;

/// Output format for replayed bars
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text columns
    Table,
    /// One JSON object per line
    Json,
}

#[derive(Args, Debug)]
pub struct ReplayArgs {
    /// JSON file containing an array of bars
    #[arg(long)]
    pub bars: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Only print bars with a signal, reversal or divergence
    #[arg(long)]
    pub signals_only: bool,
}

/// Counts collected over one replay
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReplaySummary {
    pub bars: usize,
    pub ready_bars: usize,
    pub signals: usize,
    pub reversals: usize,
    pub divergences: usize,
}

impl ReplaySummary {
    fn record(&mut self, output: &EngineOutput) {
        self.bars += 1;
        if output.ready {
            self.ready_bars += 1;
        }
        if !output.signal.is_none() {
            self.signals += 1;
        }
        if output.reversal != ReversalState::None {
            self.reversals += 1;
        }
        if output.divergence.is_some() {
            self.divergences += 1;
        }
    }
}

impl ReplayArgs {
    pub fn execute(&self, config: &EngineConfig) -> anyhow::Result<()> {
        let stdout = std::io::stdout();
        let summary = self.run(config, &mut stdout.lock())?;
        tracing::info!(
            bars = summary.bars,
            ready_bars = summary.ready_bars,
            signals = summary.signals,
            reversals = summary.reversals,
            divergences = summary.divergences,
            "Replay complete"
        );
        Ok(())
    }

    /// Replay the bar file, writing outputs to `out`
    pub fn run(
        &self,
        config: &EngineConfig,
        out: &mut impl Write,
    ) -> anyhow::Result<ReplaySummary> {
        let series = PriceSeries::load_json(&self.bars)?;
        let mut engine = AlphaRsiEngine::new(config.clone())?;
        let mut summary = ReplaySummary::default();

        tracing::info!(path = %self.bars.display(), bars = series.len(), "Replaying bars");

        if self.format == OutputFormat::Table {
            writeln!(out, "{}", table_header())?;
        }

        for bar in series.iter() {
            let started = Instant::now();
            let output = engine.advance(*bar)?;
            telemetry::record_advance_latency(started.elapsed());
            summary.record(&output);

            if self.signals_only && !output.is_actionable() {
                continue;
            }
            match self.format {
                OutputFormat::Json => writeln!(out, "{}", serde_json::to_string(&output)?)?,
                OutputFormat::Table => writeln!(out, "{}", table_row(bar.close, &output))?,
            }
        }

        Ok(summary)
    }
}

fn table_header() -> String {
    format!(
        "{:>8} {:>12} {:>7} {:>7} {:>6} {:>6} {:>6} {:>5} {:>11} {:>8} {:>10} {:>5}",
        "index", "close", "raw", "smooth", "ob", "os", "vr", "bias", "signal", "reversal",
        "divergence", "ready"
    )
}

fn table_row(close: f64, output: &EngineOutput) -> String {
    let fmt_opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{:.2}", v));
    let reversal = match output.reversal {
        ReversalState::None => "-",
        ReversalState::Bullish => "bullish",
        ReversalState::Bearish => "bearish",
    };
    let divergence = output.divergence.map_or("-", |d| d.kind.label());
    let signal = if output.signal.is_none() {
        "-"
    } else {
        output.signal.label()
    };

    format!(
        "{:>8} {:>12.4} {:>7} {:>7} {:>6.2} {:>6.2} {:>6.3} {:>5} {:>11} {:>8} {:>10} {:>5}",
        output.index,
        close,
        fmt_opt(output.oscillator.raw),
        fmt_opt(output.oscillator.smoothed),
        output.levels.ob,
        output.levels.os,
        output.volatility.vr,
        format!("{:?}", output.bias).to_lowercase(),
        signal,
        reversal,
        divergence,
        output.ready
    )
}
