//! Renders comparison rows as CSV or as a text table.
//!
//! All amounts are rounded half-up to cents here; the engine itself never
//! rounds.

use std::io::{self, Write};

use clap::ValueEnum;
use rust_decimal::Decimal;
use tax_core::{EntityType, ResultField};
use tax_core::calculations::common::round_half_up;

use crate::comparison::ComparisonRow;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Csv,
    #[default]
    Text,
}

const ENTITY_TYPE: &str = "Entity Type";
const LIABILITY_DIFFERENCE: &str = "Liability Difference";
const LIABILITY_PERCENT_DIFFERENCE: &str = "Liability % Difference";
const TAX_OWED: &str = "Tax Owed";
const EFFECTIVE_TAX_RATE: &str = "Effective Tax Rate";

const DISTRIBUTIONS_NOTE: &str =
    "note: Gross Distributions apply to S corporations only; other entity types report 0";

const LABEL_WIDTH: usize = 26;
const COLUMN_WIDTH: usize = 16;

pub fn write_report<W: Write>(
    format: ReportFormat,
    rows: &[ComparisonRow],
    writer: W,
) -> io::Result<()> {
    match format {
        ReportFormat::Csv => write_csv(rows, writer).map_err(io::Error::other),
        ReportFormat::Text => write_text(rows, writer),
    }
}

/// One record per scenario, one column per result field.
pub fn write_csv<W: Write>(
    rows: &[ComparisonRow],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["Name", ENTITY_TYPE];
    header.extend(ResultField::ALL.iter().map(ResultField::label));
    header.extend([
        TAX_OWED,
        EFFECTIVE_TAX_RATE,
        LIABILITY_DIFFERENCE,
        LIABILITY_PERCENT_DIFFERENCE,
    ]);
    csv_writer.write_record(&header)?;

    for row in rows {
        let result = &row.result;
        let mut record = vec![
            result.name.clone().unwrap_or_default(),
            result.entity_type.label().to_string(),
        ];
        record.extend(
            ResultField::ALL
                .iter()
                .map(|field| round_half_up(result.value(*field)).to_string()),
        );
        record.push(round_half_up(result.tax_owed).to_string());
        record.push(round_half_up(result.effective_tax_rate).to_string());
        record.push(optional_amount(row.liability_difference));
        record.push(optional_amount(row.liability_percent_difference));
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Transposed table: one column per scenario, one line per field, followed
/// by any advisories. A note explains the distributions row whenever a
/// non-S-corporation column is shown.
pub fn write_text<W: Write>(
    rows: &[ComparisonRow],
    mut writer: W,
) -> io::Result<()> {
    let line = |label: &str, cells: Vec<String>| {
        let mut out = format!("{label:<width$}", width = LABEL_WIDTH);
        for cell in cells {
            out.push_str(&format!("{cell:>width$}", width = COLUMN_WIDTH));
        }
        out
    };

    writeln!(
        writer,
        "{}",
        line(
            ENTITY_TYPE,
            rows.iter()
                .map(|r| r.result.entity_type.label().to_string())
                .collect()
        )
    )?;

    for field in ResultField::ALL {
        let cells = rows
            .iter()
            .map(|r| format_money(r.result.value(field)))
            .collect();
        writeln!(writer, "{}", line(field.label(), cells))?;
    }

    let owed = rows.iter().map(|r| format_money(r.result.tax_owed)).collect();
    writeln!(writer, "{}", line(TAX_OWED, owed))?;

    let rates = rows
        .iter()
        .map(|r| format_percent(Some(r.result.effective_tax_rate)))
        .collect();
    writeln!(writer, "{}", line(EFFECTIVE_TAX_RATE, rates))?;

    let differences = rows
        .iter()
        .map(|r| {
            r.liability_difference
                .map_or_else(|| "N/A".to_string(), format_money)
        })
        .collect();
    writeln!(writer, "{}", line(LIABILITY_DIFFERENCE, differences))?;

    let percents = rows
        .iter()
        .map(|r| format_percent(r.liability_percent_difference))
        .collect();
    writeln!(writer, "{}", line(LIABILITY_PERCENT_DIFFERENCE, percents))?;

    if rows.iter().any(|r| r.result.entity_type != EntityType::SCorp) {
        writeln!(writer, "{DISTRIBUTIONS_NOTE}")?;
    }

    for (index, row) in rows.iter().enumerate() {
        for warning in &row.result.warnings {
            writeln!(writer, "warning (scenario {}): {warning}", index + 1)?;
        }
    }
    Ok(())
}

fn optional_amount(value: Option<Decimal>) -> String {
    value
        .map(|v| round_half_up(v).to_string())
        .unwrap_or_default()
}

/// `$1,234.56`, with a leading minus for negatives.
pub fn format_money(value: Decimal) -> String {
    let rounded = format!("{:.2}", round_half_up(value).abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !round_half_up(value).is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}

fn format_percent(value: Option<Decimal>) -> String {
    match value {
        Some(v) => format!("{:.2}%", round_half_up(v)),
        None => "N/A".to_string(),
    }
}
