use log::trace;

use crate::{
    error::{Error, Result},
    io::format_error,
    msa::Msa,
    parsers::fasta::{FastaRecord, parse_fasta},
};


const FORMAT: &str = "a3m";

/// Parses an A3M alignment.
///
/// Lower case letters are insertions relative to the query.
/// They are removed from the aligned sequence and counted in the deletion value of the next aligned column.
pub fn parse_a3m(input: &str) -> Result<Msa> {
    let records = parse_fasta(input).map_err(|error| match error {
        Error::Format {
            line_number,
            snippet,
            reason,
            ..
        } => Error::Format {
            format: FORMAT,
            line_number,
            snippet,
            reason,
        },
        other => other,
    })?;

    let mut sequences = Vec::with_capacity(records.len());
    let mut deletion_matrix = Vec::with_capacity(records.len());
    let mut descriptions = Vec::with_capacity(records.len());
    let mut width = None;

    for FastaRecord {
        description,
        sequence,
    } in records
    {
        let mut aligned_sequence = String::with_capacity(sequence.len());
        let mut deletion_row = Vec::with_capacity(sequence.len());
        let mut deletion_count = 0;

        for residue in sequence.chars() {
            if residue.is_ascii_lowercase() {
                deletion_count += 1;
            } else {
                aligned_sequence.push(residue);
                deletion_row.push(deletion_count);
                deletion_count = 0;
            }
        }

        let row_width = deletion_row.len();
        if *width.get_or_insert(row_width) != row_width {
            return Err(format_error(
                FORMAT,
                line_of_header(input, sequences.len()),
                &format!(">{description}"),
                format!(
                    "aligned row has {row_width} columns, but the query has {}",
                    width.unwrap_or_default()
                ),
            ));
        }

        sequences.push(aligned_sequence);
        deletion_matrix.push(deletion_row);
        descriptions.push(description);
    }

    trace!("Parsed a3m alignment with {} sequences", sequences.len());
    Msa::new(sequences, deletion_matrix, descriptions)
}

/// The one-based line number of the header of the record with the given index.
fn line_of_header(input: &str, record_index: usize) -> usize {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| line.trim_start().starts_with('>'))
        .nth(record_index)
        .map(|(line_index, _)| line_index + 1)
        .unwrap_or_default()
}
