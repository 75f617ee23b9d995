use log::trace;

use crate::{
    error::{Error, Result},
    io::format_error,
};


const FORMAT: &str = "fasta";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// The header line without the leading `>`.
    pub description: String,
    pub sequence: String,
}

pub fn parse_fasta(input: &str) -> Result<Vec<FastaRecord>> {
    let mut records = Vec::<FastaRecord>::new();

    for (line_index, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim();
        if let Some(description) = line.strip_prefix('>') {
            records.push(FastaRecord {
                description: description.to_string(),
                sequence: String::new(),
            });
        } else if line.is_empty() {
            continue;
        } else if let Some(record) = records.last_mut() {
            record.sequence.push_str(line);
        } else {
            return Err(format_error(
                FORMAT,
                line_index + 1,
                raw_line,
                "sequence data before the first record header",
            ));
        }
    }

    if records.is_empty() {
        return Err(format_error(
            FORMAT,
            input.lines().count().max(1),
            input.lines().last().unwrap_or_default(),
            "input contains no fasta record",
        ));
    }

    trace!("Parsed {} fasta records", records.len());
    Ok(records)
}

/// Parses a fasta file that must contain exactly one record, such as a query file.
pub fn parse_single_fasta(input: &str) -> Result<FastaRecord> {
    let mut records = parse_fasta(input).map_err(|error| Error::Input(error.to_string()))?;
    if records.len() != 1 {
        return Err(Error::Input(format!(
            "Expected single-record fasta file, but found {} records",
            records.len()
        )));
    }

    let record = records.remove(0);
    if record.sequence.is_empty() {
        return Err(Error::Input(format!(
            "The fasta record '{}' has an empty sequence",
            record.description
        )));
    }
    Ok(record)
}
