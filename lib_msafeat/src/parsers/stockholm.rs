use std::collections::HashMap;

use itertools::Itertools;
use log::trace;
use nom::{
    IResult,
    bytes::complete::tag,
    character::complete::space1,
    combinator::{eof, rest},
    sequence::tuple,
};

use crate::{
    error::Result,
    io::{format_error, parse_whitespace, parse_word, translate_nom_error},
    msa::Msa,
};


const FORMAT: &str = "stockholm";

/// Annotations of a Stockholm file that are not part of the alignment itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockholmMetadata {
    /// `#=GS <name> DE <description>` annotations, by sequence name.
    pub descriptions: HashMap<String, String>,
    /// The concatenated `#=GC RF` reference annotation, if present.
    pub reference_annotation: Option<String>,
}

enum Line<'input> {
    Ignored,
    SequenceAnnotation {
        name: &'input str,
        feature: &'input str,
        value: &'input str,
    },
    ReferenceAnnotation(&'input str),
    Sequence {
        name: &'input str,
        chunk: &'input str,
    },
}

fn is_gap(c: char) -> bool {
    c == '-' || c == '.'
}

fn parse_line(input: &str) -> IResult<&str, Line<'_>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.starts_with("//") {
        return Ok(("", Line::Ignored));
    }

    if trimmed.starts_with("#=GS") {
        let (input, (_, _, name, _, feature, _, value)) = tuple((
            tag("#=GS"),
            space1,
            parse_word,
            space1,
            parse_word,
            parse_whitespace,
            rest,
        ))(trimmed)?;
        return Ok((
            input,
            Line::SequenceAnnotation {
                name,
                feature,
                value: value.trim(),
            },
        ));
    }

    if trimmed.starts_with("#=GC") {
        let (input, (_, _, feature, _, value)) =
            tuple((tag("#=GC"), space1, parse_word, space1, parse_word))(trimmed)?;
        return Ok((
            input,
            if feature == "RF" {
                Line::ReferenceAnnotation(value)
            } else {
                Line::Ignored
            },
        ));
    }

    if trimmed.starts_with('#') {
        return Ok(("", Line::Ignored));
    }

    let (input, (name, _, chunk, _, _)) =
        tuple((parse_word, space1, parse_word, parse_whitespace, eof))(trimmed)?;
    Ok((input, Line::Sequence { name, chunk }))
}

/// The rows of a Stockholm file in order of first appearance, with their chunks concatenated.
struct RawAlignment {
    names: Vec<String>,
    rows: Vec<String>,
    first_lines: Vec<usize>,
    metadata: StockholmMetadata,
}

fn read_raw_alignment(input: &str, max_sequences: Option<usize>) -> Result<RawAlignment> {
    let mut raw = RawAlignment {
        names: Vec::new(),
        rows: Vec::new(),
        first_lines: Vec::new(),
        metadata: StockholmMetadata::default(),
    };
    let mut name_to_index = HashMap::<String, usize>::new();

    for (line_index, line) in input.lines().enumerate() {
        let line_number = line_index + 1;
        let (_, parsed) =
            parse_line(line).map_err(|error| translate_nom_error(FORMAT, line_number, line, error))?;

        match parsed {
            Line::Ignored => {}
            Line::SequenceAnnotation {
                name,
                feature,
                value,
            } => {
                if feature == "DE" {
                    raw.metadata
                        .descriptions
                        .insert(name.to_string(), value.to_string());
                }
            }
            Line::ReferenceAnnotation(chunk) => raw
                .metadata
                .reference_annotation
                .get_or_insert_with(String::new)
                .push_str(chunk),
            Line::Sequence { name, chunk } => {
                if let Some(&index) = name_to_index.get(name) {
                    raw.rows[index].push_str(chunk);
                } else if max_sequences.is_none_or(|max_sequences| raw.rows.len() < max_sequences) {
                    name_to_index.insert(name.to_string(), raw.rows.len());
                    raw.names.push(name.to_string());
                    raw.rows.push(chunk.to_string());
                    raw.first_lines.push(line_number);
                }
            }
        }
    }

    // All rows are checked against the query width, so that every later step can zip columns.
    if let Some(query) = raw.rows.first() {
        let width = query.chars().count();
        for (row, &line_number) in raw.rows.iter().zip(&raw.first_lines) {
            let row_width = row.chars().count();
            if row_width != width {
                let line = input.lines().nth(line_number - 1).unwrap_or_default();
                return Err(format_error(
                    FORMAT,
                    line_number,
                    line,
                    format!("aligned row has {row_width} columns, but the query has {width}"),
                ));
            }
        }
    }

    Ok(raw)
}

/// Parses a Stockholm alignment whose first sequence is the query.
///
/// Columns in which the query has a gap are insert columns.
/// They are removed from all rows, and each residue in them is counted in the deletion value of the next query column.
pub fn parse_stockholm(input: &str) -> Result<(Msa, StockholmMetadata)> {
    let RawAlignment {
        names,
        rows,
        metadata,
        ..
    } = read_raw_alignment(input, None)?;

    let Some(query) = rows.first() else {
        return Ok((Msa::default(), metadata));
    };
    let query: Vec<char> = query.chars().collect();

    let mut sequences = Vec::with_capacity(rows.len());
    let mut deletion_matrix = Vec::with_capacity(rows.len());
    for row in &rows {
        let mut aligned_sequence = String::new();
        let mut deletion_row = Vec::new();
        let mut deletion_count = 0;

        for (&query_residue, residue) in query.iter().zip(row.chars()) {
            if is_gap(query_residue) {
                if !is_gap(residue) {
                    deletion_count += 1;
                }
            } else {
                aligned_sequence.push(residue);
                deletion_row.push(deletion_count);
                deletion_count = 0;
            }
        }

        sequences.push(aligned_sequence);
        deletion_matrix.push(deletion_row);
    }

    trace!("Parsed stockholm alignment with {} sequences", sequences.len());
    Ok((Msa::new(sequences, deletion_matrix, names)?, metadata))
}

/// Converts a Stockholm alignment into A3M, keeping at most `max_sequences` sequences.
///
/// A limit of zero means no limit.
///
/// Residues in insert columns become lower case, and gaps in insert columns are dropped.
pub fn convert_stockholm_to_a3m(input: &str, max_sequences: Option<usize>) -> Result<String> {
    let RawAlignment {
        names,
        rows,
        metadata,
        ..
    } = read_raw_alignment(input, max_sequences.filter(|&max_sequences| max_sequences > 0))?;

    let Some(query) = rows.first() else {
        return Err(format_error(
            FORMAT,
            input.lines().count(),
            input.lines().last().unwrap_or_default(),
            "alignment contains no sequences",
        ));
    };
    let query_is_match: Vec<bool> = query.chars().map(|c| !is_gap(c)).collect();

    let mut records = names.iter().zip(&rows).map(|(name, row)| {
        let a3m_row: String = query_is_match
            .iter()
            .zip(row.chars())
            .filter_map(|(&is_match, residue)| {
                if is_match {
                    Some(residue)
                } else if !is_gap(residue) {
                    Some(residue.to_ascii_lowercase())
                } else {
                    None
                }
            })
            .collect();
        let description = metadata
            .descriptions
            .get(name)
            .map(String::as_str)
            .unwrap_or_default();
        format!(">{name} {description}\n{a3m_row}")
    });

    Ok(records.join("\n") + "\n")
}
