//! Text and JSON output.
//!
//! Every command builds plain data first (records, catalog entries, mask
//! reports) and hands it here. Text output goes through [`styles`]; JSON output
//! is `serde_json` over the same data, so both formats always agree.

use super::styles;
use anyhow::Result;
use nvattr::attributes::{format_value, AttributeEntry};
use nvattr::config::OutputFormat;
use nvattr::{DisplayDeviceMask, ParseError, ParseStatus, ParsedAttribute};
use serde::Serialize;
use std::fmt::Write;

/// The result of parsing one command-line argument.
#[derive(Debug, Serialize)]
pub struct ParseOutcome<'a> {
    pub input: &'a str,
    pub status: ParseStatus,
    pub code: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<&'a ParsedAttribute>,
}

impl<'a> ParseOutcome<'a> {
    pub fn new(input: &'a str, result: &'a Result<ParsedAttribute, ParseError>) -> Self {
        match result {
            Ok(record) => Self {
                input,
                status: ParseStatus::Success,
                code: ParseStatus::Success.code(),
                message: None,
                position: None,
                record: Some(record),
            },
            Err(e) => Self {
                input,
                status: e.status,
                code: e.status.code(),
                message: Some(error_message(e)),
                position: Some(e.position),
                record: None,
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ParseStatus::Success
    }
}

/// Status description, plus the scanner cause when there is one.
pub fn error_message(e: &ParseError) -> String {
    match &e.cause {
        Some(cause) => format!("{}: {}", e.status, cause),
        None => e.status.to_string(),
    }
}

pub fn outcomes(outcomes: &[ParseOutcome<'_>], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(&outcomes);
    }
    let mut out = String::new();
    for outcome in outcomes {
        match outcome.record {
            Some(record) => out.push_str(&record_text(record)),
            None => {
                let _ = writeln!(
                    out,
                    "{} {}: {} (at position {})",
                    styles::error().apply_to("error"),
                    styles::input().apply_to(format!("'{}'", outcome.input)),
                    outcome.message.as_deref().unwrap_or_default(),
                    outcome.position.unwrap_or_default(),
                );
            }
        }
    }
    Ok(out)
}

pub fn record_text(record: &ParsedAttribute) -> String {
    let mut out = String::new();
    let name = record.attribute_name().unwrap_or("?");
    let _ = write!(out, "{}", styles::name().apply_to(name));
    if let (Some(entry), Some(value)) = (record.attr_entry, record.value()) {
        let _ = write!(out, " = {}", styles::value().apply_to(format_value(entry, value)));
    }
    out.push('\n');

    let mut field = |label: &str, text: &str| {
        let _ = writeln!(out, "  {:<10}{}", styles::label().apply_to(label), text);
    };
    if let Some(display) = &record.display {
        field("display", display);
    }
    if record.flags.has_target {
        field("target", &record.target_description());
    }
    if let Some(devices) = &record.display_device_specification {
        field("devices", devices);
    }
    if record.flags.assign_all_displays {
        field("applies", "all displays");
    }
    out
}

pub fn catalog<'a>(
    entries: impl Iterator<Item = &'a AttributeEntry>,
    format: OutputFormat,
) -> Result<String> {
    let entries: Vec<&AttributeEntry> = entries.collect();
    if format == OutputFormat::Json {
        return json(&entries);
    }
    let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for entry in entries {
        let flags = entry_flags(entry);
        let _ = writeln!(
            out,
            "{:<width$}  {:<8} {:>5}  {}",
            entry.name,
            entry.value_type.to_string(),
            entry.id,
            styles::label().apply_to(flags.join(",")),
            width = width
        );
    }
    Ok(out)
}

fn entry_flags(entry: &AttributeEntry) -> Vec<&'static str> {
    let f = &entry.flags;
    let i = &entry.int_flags;
    [
        (f.is_gui_attribute, "gui"),
        (f.is_framelock_attribute, "framelock"),
        (f.is_sdi_attribute, "sdi"),
        (f.hijack_display_device, "hijack"),
        (f.no_config_write, "no-config"),
        (f.no_query_all, "no-query-all"),
        (i.is_100hz, "100Hz"),
        (i.is_1000hz, "1000Hz"),
        (i.is_packed, "packed"),
        (i.is_display_mask, "display-mask"),
        (i.is_display_id, "display-id"),
        (i.no_zero, "no-zero"),
        (i.is_switch_display, "switch-display"),
    ]
    .into_iter()
    .filter_map(|(set, name)| set.then_some(name))
    .collect()
}

#[derive(Debug, Serialize)]
pub struct MaskReport {
    pub mask: u32,
    pub canonical: String,
    pub expanded: u32,
}

impl MaskReport {
    pub fn new(mask: DisplayDeviceMask) -> Self {
        Self {
            mask: mask.bits(),
            canonical: mask.to_string(),
            expanded: mask.expand_wildcards().bits(),
        }
    }
}

pub fn mask(report: &MaskReport, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(report);
    }
    let canonical = if report.canonical.is_empty() {
        "(none)"
    } else {
        &report.canonical
    };
    let mut out = String::new();
    let _ = writeln!(out, "{:<10}0x{:08x}", styles::label().apply_to("mask"), report.mask);
    let _ = writeln!(out, "{:<10}{}", styles::label().apply_to("devices"), canonical);
    let _ = writeln!(out, "{:<10}0x{:08x}", styles::label().apply_to("expanded"), report.expanded);
    Ok(out)
}

#[derive(Debug, Serialize)]
struct StatusRow {
    code: i32,
    status: ParseStatus,
    description: &'static str,
}

pub fn statuses(statuses: &[ParseStatus], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        let rows: Vec<StatusRow> = statuses
            .iter()
            .map(|s| StatusRow {
                code: s.code(),
                status: *s,
                description: s.description(),
            })
            .collect();
        return json(&rows);
    }
    let mut out = String::new();
    for status in statuses {
        let _ = writeln!(out, "{:>2}  {}", status.code(), status.description());
    }
    Ok(out)
}

fn json<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    let mut s = serde_json::to_string_pretty(data)?;
    s.push('\n');
    Ok(s)
}
