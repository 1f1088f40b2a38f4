//! Output formatting for parse results.

use std::path::Path;

use cardledger_core::{ParseResult, Severity};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output (one row per transaction)
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Render a result in the requested format.
pub fn format_result(result: &ParseResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result)),
    }
}

fn format_csv(result: &ParseResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "date",
        "description",
        "amount",
        "direction",
        "category",
        "confidence",
        "source_lines",
    ])?;

    for txn in &result.transactions {
        let refs = txn
            .source_line_refs
            .iter()
            .map(|r| format!("{}:{}", r.page_index, r.line_index))
            .collect::<Vec<_>>()
            .join(" ");

        wtr.write_record([
            txn.date.to_string().as_str(),
            &txn.description,
            &txn.amount.to_string(),
            &txn.direction.to_string(),
            txn.category.as_deref().unwrap_or(""),
            &txn.confidence.to_string(),
            &refs,
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(result: &ParseResult) -> String {
    let summary = &result.summary;
    let mut output = String::new();

    output.push_str(&format!("Bank: {}\n", summary.bank));
    if let Some(name) = &summary.cardholder_name {
        output.push_str(&format!("Cardholder: {}\n", name));
    }
    if let Some(last_4) = &summary.card_last_4 {
        output.push_str(&format!("Card: XXXX {}\n", last_4));
    }
    if let Some(period) = summary.statement_period {
        output.push_str(&format!("Period: {} to {}\n", period.start, period.end));
    }
    if let Some(date) = summary.statement_date {
        output.push_str(&format!("Statement date: {}\n", date));
    }
    if let Some(date) = summary.payment_due_date {
        output.push_str(&format!("Payment due: {}\n", date));
    }
    output.push('\n');

    output.push_str("Account:\n");
    let money = [
        ("Total dues", summary.total_dues),
        ("Minimum due", summary.minimum_due),
        ("Credit limit", summary.credit_limit),
        ("Available credit", summary.available_credit),
        ("Cash limit", summary.cash_limit),
    ];
    for (label, value) in money {
        if let Some(value) = value {
            output.push_str(&format!("  {:<17} {}\n", format!("{}:", label), value));
        }
    }
    output.push('\n');

    output.push_str(&format!("Transactions ({}):\n", result.transactions.len()));
    for txn in &result.transactions {
        let marker = match txn.confidence {
            cardledger_core::Confidence::High => " ",
            cardledger_core::Confidence::Low => "?",
        };
        output.push_str(&format!(
            "{} {}  {:<40} {:>12} {:<6}  {}\n",
            marker,
            txn.date,
            txn.description,
            txn.amount,
            txn.direction,
            txn.category.as_deref().unwrap_or("-"),
        ));
    }
    output.push('\n');
    output.push_str(&format!(
        "Debits: {}  Credits: {}\n",
        result.total_debits(),
        result.total_credits()
    ));

    if !result.warnings.is_empty() {
        output.push_str(&format!("\nWarnings ({}):\n", result.warnings.len()));
        for diagnostic in &result.warnings {
            output.push_str(&format!("  {}\n", diagnostic));
        }
    }

    output
}

/// Snake-case bank identifier, as serialized in JSON output.
fn bank_key(result: &ParseResult) -> anyhow::Result<String> {
    let value = serde_json::to_value(result.summary.bank)?;
    Ok(value.as_str().unwrap_or_default().to_string())
}

/// One summary row per processed document.
pub struct SummaryRow<'a> {
    pub filename: &'a str,
    pub result: Option<&'a ParseResult>,
    pub error: Option<&'a str>,
    pub processing_time_ms: u64,
}

/// Write a CSV with one line per document: bank, key summary fields and counts.
pub fn write_summary(path: &Path, rows: &[SummaryRow<'_>]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "bank",
        "cardholder_name",
        "period_start",
        "period_end",
        "payment_due_date",
        "total_dues",
        "minimum_due",
        "credit_limit",
        "transactions",
        "total_debits",
        "total_credits",
        "warnings",
        "processing_time_ms",
        "error",
    ])?;

    for row in rows {
        if let Some(result) = row.result {
            let summary = &result.summary;
            let status = if result.is_fatal() { "empty" } else { "success" };
            let warnings = result
                .warnings
                .iter()
                .filter(|d| d.severity >= Severity::Warn)
                .count();

            wtr.write_record([
                row.filename,
                status,
                &bank_key(result)?,
                summary.cardholder_name.as_deref().unwrap_or(""),
                &summary
                    .statement_period
                    .map(|p| p.start.to_string())
                    .unwrap_or_default(),
                &summary
                    .statement_period
                    .map(|p| p.end.to_string())
                    .unwrap_or_default(),
                &summary
                    .payment_due_date
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                &summary.total_dues.map(|d| d.to_string()).unwrap_or_default(),
                &summary.minimum_due.map(|d| d.to_string()).unwrap_or_default(),
                &summary.credit_limit.map(|d| d.to_string()).unwrap_or_default(),
                &result.transactions.len().to_string(),
                &result.total_debits().to_string(),
                &result.total_credits().to_string(),
                &warnings.to_string(),
                &row.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                row.filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &row.processing_time_ms.to_string(),
                row.error.unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
