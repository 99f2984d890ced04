use crate::Result;
use chrono::{DateTime, Utc};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use ibmcloud_core::Record;
use ibmcloud_utils::format_age;
use serde_json::Value;

/// Table formatting utilities
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    max_widths: Vec<usize>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        let max_widths = headers.iter().map(|h| h.chars().count()).collect();
        Self {
            headers,
            rows: Vec::new(),
            max_widths,
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        for (i, cell) in row.iter().enumerate() {
            if i < self.max_widths.len() {
                self.max_widths[i] = self.max_widths[i].max(cell.chars().count());
            }
        }
        self.rows.push(row);
    }

    pub fn print(&self) {
        self.print_separator('┌', '┬', '┐');
        self.print_header();
        self.print_separator('├', '┼', '┤');

        for row in &self.rows {
            self.print_row(row);
        }

        self.print_separator('└', '┴', '┘');
    }

    fn print_separator(&self, left: char, middle: char, right: char) {
        print!("{}", left);
        for (i, &width) in self.max_widths.iter().enumerate() {
            print!("{}", "─".repeat(width + 2));
            if i < self.max_widths.len() - 1 {
                print!("{}", middle);
            }
        }
        println!("{}", right);
    }

    fn print_header(&self) {
        print!("│");
        for (i, header) in self.headers.iter().enumerate() {
            let padding = self.max_widths[i] - header.chars().count();
            print!(" {}{} │", header.bold(), " ".repeat(padding));
        }
        println!();
    }

    fn print_row(&self, row: &[String]) {
        print!("│");
        for (i, cell) in row.iter().enumerate() {
            let width = self.max_widths.get(i).copied().unwrap_or(0);
            print!(" {:<width$} │", cell, width = width);
        }
        println!();
    }
}

/// One table column: a header and the dotted path of the field it shows
#[derive(Debug, Clone, Copy)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
}

impl Column {
    pub const fn new(header: &'static str, field: &'static str) -> Self {
        Self { header, field }
    }
}

/// Text for a dotted field path such as `zone.name`; `-` when absent
pub fn field_text(record: &Record, path: &str) -> String {
    let pointer = format!("/{}", path.replace('.', "/"));

    match record.pointer(&pointer) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(Value::Array(items)) => items.len().to_string(),
        Some(other) => other.to_string(),
    }
}

/// Age of an RFC 3339 timestamp, e.g. `3d 4h`
pub fn age_text(timestamp: &str, now: DateTime<Utc>) -> Option<String> {
    let created = DateTime::parse_from_rfc3339(timestamp).ok()?;
    let seconds = (now - created.with_timezone(&Utc)).num_seconds().max(0);
    Some(format_age(seconds as u64))
}

/// Display the records stored under `field` of a list response
pub fn print_records(body: &Record, field: &str, columns: &[Column], json: bool) -> Result<()> {
    if json {
        return print_json(body);
    }

    let records = body
        .get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if records.is_empty() {
        println!("{}", format!("No {} found.", field.replace('_', " ")).yellow());
        return Ok(());
    }

    let now = Utc::now();
    let mut headers: Vec<String> = columns.iter().map(|c| c.header.to_string()).collect();
    headers.push("Age".to_string());

    let mut table = Table::new(headers);
    for record in records {
        let mut row: Vec<String> = columns.iter().map(|c| field_text(record, c.field)).collect();
        row.push(
            record
                .get("created_at")
                .and_then(Value::as_str)
                .and_then(|ts| age_text(ts, now))
                .unwrap_or_else(|| "-".to_string()),
        );
        table.add_row(row);
    }

    table.print();
    Ok(())
}

/// Display a single record as a two-column table of its scalar fields
pub fn print_record(record: &Record, json: bool) -> Result<()> {
    let fields = match record.as_object() {
        Some(fields) if !json => fields,
        _ => return print_json(record),
    };

    let mut table = Table::new(vec!["Field".to_string(), "Value".to_string()]);
    for (key, value) in fields {
        let text = match value {
            Value::Object(nested) => match nested.get("name").or_else(|| nested.get("id")) {
                Some(Value::String(s)) => s.clone(),
                _ => continue,
            },
            Value::Array(_) => continue,
            _ => field_text(record, key),
        };
        table.add_row(vec![key.clone(), text]);
    }

    table.print();
    Ok(())
}

pub fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Interactive prompts
pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    let result = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(message)
        .default(default)
        .interact()?;

    Ok(result)
}

/// Status messages
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
