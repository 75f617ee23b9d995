use std::{
    fs,
    io::{Write, stdout},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lib_msafeat::{
    msa::Msa,
    parsers::{a3m::parse_a3m, fasta::parse_fasta, hhr::parse_hhr, stockholm::parse_stockholm},
};
use log::{LevelFilter, info};

use crate::init_logging;

#[cfg(test)]
mod tests;

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The format of the input file.
    #[clap(long, short = 'f')]
    format: InputFormat,

    /// A raw output file of a search tool, or a fasta file.
    input: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    Sto,
    A3m,
    Hhr,
    Fasta,
}

pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    info!("Reading {:?} as {:?}", cli.input, cli.format);
    let input = fs::read_to_string(&cli.input)
        .with_context(|| format!("Error reading input file {:?}", cli.input))?;

    let mut output = stdout().lock();
    summarise(&mut output, cli.format, &input)?;
    output.flush()?;

    Ok(())
}

/// Parses `input` and writes a human-readable summary of it.
pub fn summarise(mut output: impl Write, format: InputFormat, input: &str) -> Result<()> {
    match format {
        InputFormat::Sto => {
            let (msa, metadata) = parse_stockholm(input)?;
            write_msa_summary(&mut output, &msa)?;
            writeln!(
                output,
                "{} sequences have a description",
                metadata.descriptions.len()
            )?;
        }
        InputFormat::A3m => write_msa_summary(&mut output, &parse_a3m(input)?)?,
        InputFormat::Hhr => {
            let hits = parse_hhr(input)?;
            writeln!(output, "{} hits", hits.len())?;
            for hit in hits {
                writeln!(
                    output,
                    "{:>4} {:<30} prob={:.1} e-value={:.2e} aligned_cols={} sum_probs={:.1}",
                    hit.index,
                    hit.name.split_whitespace().next().unwrap_or_default(),
                    hit.probability,
                    hit.e_value,
                    hit.aligned_cols,
                    hit.sum_probs
                )?;
            }
        }
        InputFormat::Fasta => {
            let records = parse_fasta(input)?;
            writeln!(output, "{} records", records.len())?;
            for record in records {
                writeln!(
                    output,
                    "{}: {} residues",
                    record.description,
                    record.sequence.chars().count()
                )?;
            }
        }
    }

    Ok(())
}

fn write_msa_summary(mut output: impl Write, msa: &Msa) -> Result<()> {
    let deletions: u64 = msa
        .deletion_matrix
        .iter()
        .flatten()
        .map(|&deletions| u64::from(deletions))
        .sum();

    writeln!(output, "{} sequences", msa.len())?;
    writeln!(output, "{} columns", msa.width().unwrap_or_default())?;
    writeln!(output, "{deletions} deleted residues")?;
    Ok(())
}
