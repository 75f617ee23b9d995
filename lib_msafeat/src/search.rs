//! Runs the three database searches of one pipeline run concurrently.
//!
//! Each search owns its tool and writes its raw output to a distinct side file in the output directory,
//! so the searches share no mutable state.

use std::{fs, path::Path, thread};

use log::debug;

use crate::{
    error::{Error, Result},
    msa::Msa,
    parsers::{
        a3m::parse_a3m,
        hhr::{TemplateHit, parse_hhr},
        stockholm::{convert_stockholm_to_a3m, parse_stockholm},
    },
    tools::{MsaSearchTool, TemplateSearchTool},
};


pub const UNIREF90_HITS_FILE_NAME: &str = "uniref90_hits.sto";
pub const PDB70_HITS_FILE_NAME: &str = "pdb70_hits.hhr";
pub const MGNIFY_HITS_FILE_NAME: &str = "mgnify_hits.sto";
pub const SMALL_BFD_HITS_FILE_NAME: &str = "small_bfd_hits.sto";
pub const BFD_UNICLUST_HITS_FILE_NAME: &str = "bfd_uniclust_hits.a3m";

/// The strategy of the third search, fixed when the pipeline is built.
pub enum TertiarySearch {
    /// A single profile search of a reduced database, reporting Stockholm.
    SmallBfd(Box<dyn MsaSearchTool>),
    /// An iterative search of a large database and a clustering database, reporting A3M.
    BfdUniclust(Box<dyn MsaSearchTool>),
}

impl TertiarySearch {
    pub fn name(&self) -> &'static str {
        match self {
            Self::SmallBfd(_) => "small BFD",
            Self::BfdUniclust(_) => "BFD/Uniclust",
        }
    }

    pub fn output_file_name(&self) -> &'static str {
        match self {
            Self::SmallBfd(_) => SMALL_BFD_HITS_FILE_NAME,
            Self::BfdUniclust(_) => BFD_UNICLUST_HITS_FILE_NAME,
        }
    }

    fn tool(&self) -> &dyn MsaSearchTool {
        match self {
            Self::SmallBfd(tool) | Self::BfdUniclust(tool) => tool.as_ref(),
        }
    }

    fn parse(&self, raw_output: &str) -> Result<Msa> {
        match self {
            Self::SmallBfd(_) => parse_stockholm(raw_output).map(|(msa, _)| msa),
            Self::BfdUniclust(_) => parse_a3m(raw_output),
        }
    }
}

/// The tools used by the searches of a pipeline.
pub struct SearchTools {
    pub uniref90: Box<dyn MsaSearchTool>,
    pub pdb70: Box<dyn TemplateSearchTool>,
    pub mgnify: Box<dyn MsaSearchTool>,
    pub tertiary: TertiarySearch,
    /// The maximum number of UniRef90 sequences passed on to the template search.
    pub uniref_max_hits: usize,
}

/// The parsed results of the three searches of one run.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub uniref90_msa: Msa,
    pub template_hits: Vec<TemplateHit>,
    pub mgnify_msa: Msa,
    pub tertiary_msa: Msa,
}

/// Runs the three searches concurrently and waits for all of them.
///
/// If any search fails, the error of the first failed search is returned after all searches have finished.
/// Side files of successful searches are kept.
pub fn run_searches(
    tools: &SearchTools,
    input_fasta_path: &Path,
    msa_output_dir: &Path,
) -> Result<SearchResults> {
    let (uniref90, mgnify, tertiary) = thread::scope(|scope| {
        let uniref90 =
            scope.spawn(|| search_uniref90_and_templates(tools, input_fasta_path, msa_output_dir));
        let mgnify = scope.spawn(|| search_mgnify(tools, input_fasta_path, msa_output_dir));
        let tertiary = scope.spawn(|| search_tertiary(tools, input_fasta_path, msa_output_dir));

        (
            join_search(UNIREF90, uniref90),
            join_search(MGNIFY, mgnify),
            join_search(tools.tertiary.name(), tertiary),
        )
    });

    let (uniref90_msa, template_hits) = uniref90?;
    Ok(SearchResults {
        uniref90_msa,
        template_hits,
        mgnify_msa: mgnify?,
        tertiary_msa: tertiary?,
    })
}

const UNIREF90: &str = "UniRef90";
const MGNIFY: &str = "MGnify";

fn join_search<T>(search: &'static str, handle: thread::ScopedJoinHandle<'_, Result<T>>) -> Result<T> {
    handle
        .join()
        .map_err(|_| Error::TaskPanicked(search))?
        .map_err(|error| Error::Search {
            search,
            source: Box::new(error),
        })
}

fn search_uniref90_and_templates(
    tools: &SearchTools,
    input_fasta_path: &Path,
    msa_output_dir: &Path,
) -> Result<(Msa, Vec<TemplateHit>)> {
    let stockholm = tools.uniref90.query(input_fasta_path)?;
    write_side_file(msa_output_dir, UNIREF90_HITS_FILE_NAME, &stockholm)?;

    let a3m = convert_stockholm_to_a3m(&stockholm, Some(tools.uniref_max_hits))?;
    let hhr = tools.pdb70.query(&a3m)?;
    write_side_file(msa_output_dir, PDB70_HITS_FILE_NAME, &hhr)?;

    let template_hits = parse_hhr(&hhr)?;
    let (msa, _) = parse_stockholm(&stockholm)?;
    debug!(
        "{UNIREF90} search found {} sequences and {} template hits",
        msa.len(),
        template_hits.len()
    );
    Ok((msa, template_hits))
}

fn search_mgnify(tools: &SearchTools, input_fasta_path: &Path, msa_output_dir: &Path) -> Result<Msa> {
    let stockholm = tools.mgnify.query(input_fasta_path)?;
    write_side_file(msa_output_dir, MGNIFY_HITS_FILE_NAME, &stockholm)?;

    let (msa, _) = parse_stockholm(&stockholm)?;
    debug!("{MGNIFY} search found {} sequences", msa.len());
    Ok(msa)
}

fn search_tertiary(
    tools: &SearchTools,
    input_fasta_path: &Path,
    msa_output_dir: &Path,
) -> Result<Msa> {
    let tertiary = &tools.tertiary;
    let raw_output = tertiary.tool().query(input_fasta_path)?;
    write_side_file(msa_output_dir, tertiary.output_file_name(), &raw_output)?;

    let msa = tertiary.parse(&raw_output)?;
    debug!("{} search found {} sequences", tertiary.name(), msa.len());
    Ok(msa)
}

/// Writes a raw search output, replacing the file of a previous run.
fn write_side_file(msa_output_dir: &Path, file_name: &str, content: &str) -> Result<()> {
    let path = msa_output_dir.join(file_name);
    fs::write(&path, content).map_err(|error| Error::io_at("writing", &path, error))?;
    debug!("Wrote {path:?}");
    Ok(())
}
