//! Text table output for daily weather records.

use std::io::{self, Write};

use weather_core::{WeatherRecord, model::DATE_FORMAT};

pub const HEADERS: [&str; 11] = [
    "date",
    "tempmax",
    "feelslikemax",
    "tempmin",
    "feelslikemin",
    "precip",
    "preciptype",
    "windgust",
    "windspeed",
    "cloudcover",
    "conditions",
];

/// Minimum spaces between aligned columns.
const COLUMN_GAP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableStyle {
    /// Space-padded columns that line up in a fixed-width font.
    #[default]
    Aligned,
    /// Cells separated by a single tab, no padding.
    Raw,
}

/// Write a header line plus one line per record, in input order.
pub fn render<W: Write>(records: &[WeatherRecord], out: &mut W, style: TableStyle) -> io::Result<()> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(records.len() + 1);
    rows.push(HEADERS.iter().map(|h| h.to_string()).collect());
    rows.extend(records.iter().map(row_cells));

    match style {
        TableStyle::Aligned => write_aligned(&rows, out)?,
        TableStyle::Raw => {
            for row in &rows {
                writeln!(out, "{}", row.join("\t"))?;
            }
        }
    }

    out.flush()
}

fn row_cells(r: &WeatherRecord) -> Vec<String> {
    vec![
        r.date.format(DATE_FORMAT).to_string(),
        format!("{:.1}", r.temp_max),
        format!("{:.1}", r.feels_like_max),
        format!("{:.1}", r.temp_min),
        format!("{:.1}", r.feels_like_min),
        format!("{:.1}", r.precip),
        r.precip_type.clone(),
        format!("{:.1}", r.wind_gust),
        format!("{:.1}", r.wind_speed),
        format!("{:.1}", r.cloud_cover),
        r.conditions.clone(),
    ]
}

/// Every column but the last is padded to its widest cell plus the gap;
/// the last column is written unpadded.
fn write_aligned<W: Write>(rows: &[Vec<String>], out: &mut W) -> io::Result<()> {
    let padded = HEADERS.len() - 1;
    let mut widths = vec![0usize; padded];
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    for row in rows {
        let mut line = String::new();
        for (i, cell) in row.iter().enumerate() {
            match widths.get(i) {
                Some(width) => line.push_str(&format!("{cell:<w$}", w = width + COLUMN_GAP)),
                None => line.push_str(cell),
            }
        }
        writeln!(out, "{line}")?;
    }

    Ok(())
}
