use crate::{ProductRecord, ScraperError};
use chrono::{DateTime, Utc};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};
use tracing::debug;

const BOM: char = '\u{feff}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// First column of every row, in file order. There is no header handling:
/// a header row is just one more identifier.
pub fn read_identifiers<R: Read>(reader: R) -> Result<Vec<String>, ScraperError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut identifiers = vec![];
    for record in reader.records() {
        let record = record?;
        if let Some(first) = record.get(0) {
            let first = if identifiers.is_empty() {
                first.trim_start_matches(BOM)
            } else {
                first
            };
            identifiers.push(first.trim().to_string());
        }
    }
    debug!("Read {} rows", identifiers.len());
    Ok(identifiers)
}

pub fn load_identifiers<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ScraperError> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(ScraperError::UnsupportedInput(path.to_path_buf()));
    }
    read_identifiers(File::open(path)?)
}

pub fn write_csv<W: Write>(writer: W, records: &[ProductRecord]) -> Result<(), ScraperError> {
    let mut writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        writer.write_record(["identifier", "name", "price", "packaging_unit"])?;
    }
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(writer: W, records: &[ProductRecord]) -> Result<(), ScraperError> {
    serde_json::to_writer_pretty(writer, records)?;
    Ok(())
}

pub fn write_report<P: AsRef<Path>>(
    path: P,
    format: OutputFormat,
    records: &[ProductRecord],
) -> Result<(), ScraperError> {
    let mut writer = BufWriter::new(File::create(path)?);
    match format {
        OutputFormat::Csv => write_csv(&mut writer, records)?,
        OutputFormat::Json => write_json(&mut writer, records)?,
    }
    writer.flush()?;
    Ok(())
}

pub fn default_output_name(now: DateTime<Utc>, format: OutputFormat) -> String {
    format!(
        "bus_nl_scraped_data_{}.{}",
        now.timestamp(),
        format.extension()
    )
}
