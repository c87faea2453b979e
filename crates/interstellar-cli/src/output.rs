//! Output formatting for command results.
//!
//! Route summaries and distance tables are rendered by the library; this
//! module picks the format and handles the listings that only the CLI shows.

use std::fmt::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

use interstellar_lib::{Finding, RouteRenderMode, RouteSummary, Severity, Vertex};

use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated stops, one line per route.
    Plain,
    /// Numbered, human-friendly listing.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl OutputFormat {
    fn render_mode(self) -> Option<RouteRenderMode> {
        match self {
            OutputFormat::Plain => Some(RouteRenderMode::Plain),
            OutputFormat::Text => Some(RouteRenderMode::Text),
            OutputFormat::Json => None,
        }
    }
}

/// Serialize `value` as pretty JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output as JSON")
}

/// Render a route summary in the requested format.
pub fn render_route(summary: &RouteSummary, format: OutputFormat) -> Result<String> {
    match format.render_mode() {
        Some(mode) => Ok(summary.render(mode)),
        None => to_json(summary),
    }
}

/// Render the planet listing in collection order.
pub fn render_planets(planets: &[Vertex], format: OutputFormat) -> Result<String> {
    let mut buffer = String::new();
    match format {
        OutputFormat::Json => return to_json(planets),
        OutputFormat::Plain => {
            for planet in planets {
                let _ = writeln!(buffer, "{}\t{}", planet.id, planet.name);
            }
        }
        OutputFormat::Text => {
            let _ = writeln!(buffer, "{} planets:", planets.len());
            for planet in planets {
                let _ = writeln!(buffer, "- {} ({})", planet.name, planet.id);
            }
        }
    }
    Ok(buffer)
}

/// Render audit findings; the palette only affects the text format.
pub fn render_findings(
    findings: &[Finding],
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<String> {
    let mut buffer = String::new();
    match format {
        OutputFormat::Json => return to_json(findings),
        OutputFormat::Plain => {
            for finding in findings {
                let code = finding.code.map(|code| code.label()).unwrap_or("-");
                let _ = writeln!(
                    buffer,
                    "{}\t{}\t{}",
                    severity_label(finding.severity),
                    code,
                    finding.message
                );
            }
        }
        OutputFormat::Text => {
            if findings.is_empty() {
                let _ = writeln!(buffer, "{}No problems found.{}", palette.green, palette.reset);
                return Ok(buffer);
            }
            for finding in findings {
                let tag = match finding.severity {
                    Severity::Error => palette.tag_error,
                    Severity::Warning => palette.tag_warning,
                };
                let _ = writeln!(
                    buffer,
                    "{tag}{}{} {}",
                    severity_label(finding.severity),
                    palette.reset,
                    finding.message
                );
            }
            let errors = error_count(findings);
            let _ = writeln!(
                buffer,
                "{}{} error(s), {} warning(s){}",
                palette.gray,
                errors,
                findings.len() - errors,
                palette.reset
            );
        }
    }
    Ok(buffer)
}

/// Number of error-level findings.
pub fn error_count(findings: &[Finding]) -> usize {
    findings
        .iter()
        .filter(|finding| finding.severity == Severity::Error)
        .count()
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARN",
    }
}
