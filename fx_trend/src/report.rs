//! Rendering of metrics and predictions as text or JSON
//!
//! Values are shown exactly as the engine produced them; nothing here
//! recomputes or adjusts a number except the derived expected change.

use crate::data::{RatePoint, RateSeries};
use crate::error::{Result, TrendError};
use crate::metrics::{Trend, TrendMetrics};
use crate::models::Prediction;
use chrono::NaiveDate;
use colored::{Color, Colorize};
use rate_math::{mean, percentage_change};
use serde::Serialize;
use std::io::Write;

const SPARK_CHARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
const RULE_WIDTH: usize = 50;
/// Points shown in the rate chart
const CHART_POINTS: usize = 30;
const CHART_WIDTH: usize = 40;

/// Observed period covered by a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    /// Number of observations
    pub days: usize,
}

/// Everything the presentation layer shows for one pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub base: String,
    pub target: String,
    pub period: ReportPeriod,
    pub metrics: TrendMetrics,
    pub predictions: Vec<Prediction>,
    pub historical: Vec<RatePoint>,
}

impl TrendReport {
    pub fn new(series: &RateSeries, metrics: TrendMetrics, predictions: Vec<Prediction>) -> Result<Self> {
        let (first, last) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(TrendError::EmptySeries),
        };

        Ok(Self {
            base: series.pair().base.clone(),
            target: series.pair().target.clone(),
            period: ReportPeriod {
                start: first.date,
                end: last.date,
                days: series.len(),
            },
            metrics,
            predictions,
            historical: series.points().to_vec(),
        })
    }
}

/// Pretty-printed JSON document of the report
pub fn render_json(report: &TrendReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Signed percentage with two decimals, e.g. `+1.25%`
pub fn format_percentage(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}

/// Percent change from the current rate to the mean predicted rate
pub fn expected_change(current: f64, predictions: &[Prediction]) -> f64 {
    let predicted: Vec<f64> = predictions.iter().map(|p| p.predicted).collect();
    match mean(&predicted) {
        Ok(avg) => percentage_change(current, avg),
        Err(_) => 0.0,
    }
}

/// One-line bar chart of the values sampled across `width` columns
pub fn sparkline(values: &[f64], width: usize) -> String {
    if values.is_empty() {
        return String::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 {
        return "─".repeat(width);
    }

    let step = values.len() as f64 / width as f64;
    (0..width)
        .map(|i| {
            let index = ((i as f64 * step).floor() as usize).min(values.len() - 1);
            let normalized = (values[index] - min) / range;
            SPARK_CHARS[(normalized * (SPARK_CHARS.len() - 1) as f64).floor() as usize]
        })
        .collect()
}

/// Human-readable report writer
#[derive(Debug, Clone, Copy)]
pub struct TextRenderer {
    color: bool,
}

impl TextRenderer {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn signed(&self, value: f64) -> String {
        let color = if value >= 0.0 { Color::Green } else { Color::Red };
        self.paint(&format_percentage(value), color)
    }

    fn trend(&self, trend: Trend) -> String {
        match trend {
            Trend::Up => self.paint("▲ UP", Color::Green),
            Trend::Down => self.paint("▼ DOWN", Color::Red),
            Trend::Stable => self.paint("→ STABLE", Color::Yellow),
        }
    }

    fn confidence(&self, confidence: f64) -> String {
        let color = if confidence >= 70.0 {
            Color::Green
        } else if confidence >= 50.0 {
            Color::Yellow
        } else {
            Color::Red
        };
        self.paint(&format!("{:.0}%", confidence), color)
    }

    pub fn render<W: Write>(&self, report: &TrendReport, out: &mut W) -> Result<()> {
        let m = &report.metrics;
        let rule = "═".repeat(RULE_WIDTH);

        let title = format!("{}/{} Currency Trend Report", report.base, report.target);
        writeln!(out, "\n{}", self.bold(&self.paint(&title, Color::Blue)))?;
        writeln!(out, "{}", rule)?;

        writeln!(out, "\n{}", self.bold("Current Status"))?;
        writeln!(out, "  Rate: {}", self.bold(&format!("{:.4}", m.current)))?;
        writeln!(out, "  Change: {}", self.signed(m.change_percent))?;
        writeln!(out, "  Trend: {}", self.trend(m.trend))?;

        writeln!(out, "\n{}", self.bold("Historical Analysis"))?;
        writeln!(out, "  Period: {} to {}", report.period.start, report.period.end)?;
        writeln!(out, "  Mean: {:.4}", m.mean)?;
        writeln!(out, "  Median: {:.4}", m.median)?;
        writeln!(out, "  Range: {:.4} - {:.4}", m.min, m.max)?;
        writeln!(out, "  Volatility: {:.4}", m.volatility)?;

        writeln!(out, "\n{}", self.bold("Moving Averages"))?;
        writeln!(out, "  7-day: {:.4}", m.moving_averages.ma7)?;
        writeln!(out, "  14-day: {:.4}", m.moving_averages.ma14)?;
        writeln!(out, "  30-day: {:.4}", m.moving_averages.ma30)?;

        writeln!(out, "\n{}", self.bold("Rate Chart (Last 30 Days)"))?;
        let start = report.historical.len().saturating_sub(CHART_POINTS);
        let recent: Vec<f64> = report.historical[start..].iter().map(|p| p.rate).collect();
        writeln!(
            out,
            "  {} {} {}",
            self.paint(&format!("{:.2}", m.min), Color::BrightBlack),
            sparkline(&recent, CHART_WIDTH),
            self.paint(&format!("{:.2}", m.max), Color::BrightBlack)
        )?;

        if !report.predictions.is_empty() {
            writeln!(out, "\n{}", self.bold("Predictions"))?;
            writeln!(out, "{}", self.paint("  Date        Rate      Confidence", Color::BrightBlack))?;
            writeln!(out, "{}", self.paint("  ────────── ──────── ───────────", Color::BrightBlack))?;

            for p in &report.predictions {
                writeln!(
                    out,
                    "  {}  {:.4}   {}",
                    p.date,
                    p.predicted,
                    self.confidence(p.confidence)
                )?;
            }

            let change = expected_change(m.current, &report.predictions);
            writeln!(
                out,
                "\n  {} {}",
                self.bold("Expected Change:"),
                self.signed(change)
            )?;
        }

        writeln!(out, "\n{}\n", rule)?;
        Ok(())
    }
}

/// Render the text report into a string
pub fn render_text(report: &TrendReport, color: bool) -> Result<String> {
    let mut buf = Vec::new();
    TextRenderer::new(color).render(report, &mut buf)?;
    String::from_utf8(buf).map_err(|e| TrendError::InvalidParameter(e.to_string()))
}
