use log::trace;
use nom::{
    IResult,
    bytes::complete::{tag, take_while},
    character::complete::{char, digit1},
    combinator::map_res,
    number::complete::double,
    sequence::{delimited, tuple},
};

use crate::{
    error::Result,
    io::{format_error, parse_digits, parse_whitespace, translate_nom_error},
};


const FORMAT: &str = "hhr";

/// Alignment lines carry the name of the aligned sequence in a fixed-width column before this offset.
const ALIGNMENT_COLUMN_OFFSET: usize = 17;

/// One hit of an HHR hit report.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemplateHit {
    /// The rank of the hit as given in the report, starting at one.
    pub index: usize,
    pub name: String,
    pub probability: f64,
    pub e_value: f64,
    pub score: f64,
    pub aligned_cols: usize,
    /// Sequence identity in percent.
    pub identity: f64,
    pub similarity: f64,
    pub sum_probs: f64,
    pub template_neff: f64,
    /// The aligned part of the query, with gaps.
    pub query: String,
    /// The aligned part of the template, with gaps.
    pub hit_sequence: String,
    /// For each alignment column, the zero-based query residue index, or `None` for a gap.
    pub indices_query: Vec<Option<usize>>,
    /// For each alignment column, the zero-based template residue index, or `None` for a gap.
    pub indices_hit: Vec<Option<usize>>,
}

struct Summary {
    probability: f64,
    e_value: f64,
    score: f64,
    aligned_cols: usize,
    identity: f64,
    similarity: f64,
    sum_probs: f64,
    template_neff: f64,
}

struct AlignmentChunk<'input> {
    start: usize,
    residues: &'input str,
    end: usize,
}

/// Parses an HHR hit report, preserving the order of the hits.
pub fn parse_hhr(input: &str) -> Result<Vec<TemplateHit>> {
    let lines: Vec<&str> = input.lines().collect();
    let mut block_starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.starts_with("No "))
        .map(|(line_index, _)| line_index)
        .collect();
    block_starts.push(lines.len());

    let hits = block_starts
        .windows(2)
        .map(|block| parse_hit(&lines[block[0]..block[1]], block[0]))
        .collect::<Result<Vec<_>>>()?;

    trace!("Parsed hhr report with {} hits", hits.len());
    Ok(hits)
}

fn parse_hit(lines: &[&str], first_line_index: usize) -> Result<TemplateHit> {
    let line_number = |offset: usize| first_line_index + offset + 1;

    if lines.len() < 3 {
        return Err(format_error(
            FORMAT,
            line_number(0),
            lines[0],
            "hit block is shorter than three lines",
        ));
    }

    let index = lines[0]
        .split_whitespace()
        .last()
        .and_then(|number| number.parse().ok())
        .ok_or_else(|| format_error(FORMAT, line_number(0), lines[0], "missing hit number"))?;
    let name = lines[1]
        .strip_prefix('>')
        .ok_or_else(|| {
            format_error(
                FORMAT,
                line_number(1),
                lines[1],
                "expected '>' followed by the template name",
            )
        })?
        .to_string();
    let (_, summary) = parse_summary(lines[2])
        .map_err(|error| translate_nom_error(FORMAT, line_number(2), lines[2], error))?;

    let mut query = String::new();
    let mut hit_sequence = String::new();
    let mut indices_query = Vec::new();
    let mut indices_hit = Vec::new();
    let mut block_width = None;

    for (offset, &line) in lines.iter().enumerate().skip(3) {
        let is_query = line.starts_with("Q ");
        if !(is_query || line.starts_with("T ")) || is_annotation_line(line) {
            continue;
        }

        let chunk = line
            .get(ALIGNMENT_COLUMN_OFFSET..)
            .ok_or_else(|| {
                format_error(FORMAT, line_number(offset), line, "alignment line is too short")
            })
            .and_then(|columns| {
                parse_alignment_chunk(columns)
                    .map(|(_, chunk)| chunk)
                    .map_err(|error| translate_nom_error(FORMAT, line_number(offset), line, error))
            })?;
        let start = chunk.start.checked_sub(1).ok_or_else(|| {
            format_error(FORMAT, line_number(offset), line, "residue positions start at one")
        })?;
        let width = chunk.residues.len();

        if is_query {
            let insertions = chunk.residues.chars().filter(|&c| c == '-').count();
            if chunk.end + insertions != start + width {
                return Err(format_error(
                    FORMAT,
                    line_number(offset),
                    line,
                    format!(
                        "query chunk has {width} columns, but its positions {}..{} and {insertions} gaps imply {}",
                        chunk.start,
                        chunk.end,
                        (chunk.end + insertions).saturating_sub(start)
                    ),
                ));
            }
            block_width = Some(width);
            query.push_str(chunk.residues);
            push_residue_indices(chunk.residues, start, &mut indices_query);
        } else {
            if block_width != Some(width) {
                return Err(format_error(
                    FORMAT,
                    line_number(offset),
                    line,
                    format!(
                        "template chunk has {width} columns, but the preceding query chunk has {}",
                        block_width.map_or_else(|| "none".to_string(), |width| width.to_string())
                    ),
                ));
            }
            hit_sequence.push_str(chunk.residues);
            push_residue_indices(chunk.residues, start, &mut indices_hit);
        }
    }

    Ok(TemplateHit {
        index,
        name,
        probability: summary.probability,
        e_value: summary.e_value,
        score: summary.score,
        aligned_cols: summary.aligned_cols,
        identity: summary.identity,
        similarity: summary.similarity,
        sum_probs: summary.sum_probs,
        template_neff: summary.template_neff,
        query,
        hit_sequence,
        indices_query,
        indices_hit,
    })
}

fn is_annotation_line(line: &str) -> bool {
    ["ss_dssp", "ss_pred", "Consensus"]
        .iter()
        .any(|annotation| line[2..].starts_with(annotation))
}

fn push_residue_indices(residues: &str, start: usize, indices: &mut Vec<Option<usize>>) {
    let mut position = start;
    for residue in residues.chars() {
        if residue == '-' {
            indices.push(None);
        } else {
            indices.push(Some(position));
            position += 1;
        }
    }
}

fn parse_named_value(name: &str) -> impl '_ + FnMut(&str) -> IResult<&str, f64> {
    move |input| {
        let (input, _) = tuple((parse_whitespace, tag(name), char('=')))(input)?;
        double(input)
    }
}

fn parse_summary(input: &str) -> IResult<&str, Summary> {
    let (input, probability) = parse_named_value("Probab")(input)?;
    let (input, e_value) = parse_named_value("E-value")(input)?;
    let (input, score) = parse_named_value("Score")(input)?;
    let (input, _) = tuple((parse_whitespace, tag("Aligned_cols"), char('=')))(input)?;
    let (input, aligned_cols) = map_res(digit1, str::parse::<usize>)(input)?;
    let (input, identity) = parse_named_value("Identities")(input)?;
    let (input, _) = char('%')(input)?;
    let (input, similarity) = parse_named_value("Similarity")(input)?;
    let (input, sum_probs) = parse_named_value("Sum_probs")(input)?;
    let (input, template_neff) = parse_named_value("Template_Neff")(input)?;

    Ok((
        input,
        Summary {
            probability,
            e_value,
            score,
            aligned_cols,
            identity,
            similarity,
            sum_probs,
            template_neff,
        },
    ))
}

fn parse_alignment_chunk(input: &str) -> IResult<&str, AlignmentChunk<'_>> {
    let (input, (_, start, _, residues, _, end, _, _)) = tuple((
        parse_whitespace,
        map_res(digit1, str::parse::<usize>),
        char(' '),
        take_while(|c: char| c.is_ascii_uppercase() || c == '-'),
        parse_whitespace,
        map_res(digit1, str::parse::<usize>),
        char(' '),
        delimited(char('('), parse_digits, char(')')),
    ))(input)?;

    Ok((
        input,
        AlignmentChunk {
            start,
            residues,
            end,
        },
    ))
}
