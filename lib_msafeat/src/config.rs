use std::path::PathBuf;

pub const DEFAULT_MGNIFY_MAX_HITS: usize = 501;
pub const DEFAULT_UNIREF_MAX_HITS: usize = 10_000;
pub const DEFAULT_MAX_TEMPLATE_HITS: usize = 20;
pub const DEFAULT_N_CPU: usize = 8;

/// Locations of the search binaries and databases, and limits for the feature pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct PipelineConfig {
    pub jackhmmer_binary_path: PathBuf,
    pub hhblits_binary_path: PathBuf,
    pub hhsearch_binary_path: PathBuf,

    pub uniref90_database_path: PathBuf,
    pub mgnify_database_path: PathBuf,
    pub pdb70_database_path: PathBuf,
    pub tertiary_search: TertiarySearchConfig,

    /// Rows of the MGnify MSA that are kept for the merged MSA.
    #[cfg_attr(feature = "serde", serde(default = "default_mgnify_max_hits"))]
    pub mgnify_max_hits: usize,
    /// Sequences of the UniRef90 MSA that are passed to the template search.
    #[cfg_attr(feature = "serde", serde(default = "default_uniref_max_hits"))]
    pub uniref_max_hits: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_max_template_hits"))]
    pub max_template_hits: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_n_cpu"))]
    pub n_cpu: usize,
}

/// The database searched by the third search.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum TertiarySearchConfig {
    /// A single jackhmmer search of the reduced BFD.
    SmallBfd { small_bfd_database_path: PathBuf },
    /// An hhblits search of the full BFD together with Uniclust30.
    BfdUniclust {
        bfd_database_path: PathBuf,
        uniclust30_database_path: PathBuf,
    },
}

#[cfg(feature = "serde")]
fn default_mgnify_max_hits() -> usize {
    DEFAULT_MGNIFY_MAX_HITS
}

#[cfg(feature = "serde")]
fn default_uniref_max_hits() -> usize {
    DEFAULT_UNIREF_MAX_HITS
}

#[cfg(feature = "serde")]
fn default_max_template_hits() -> usize {
    DEFAULT_MAX_TEMPLATE_HITS
}

#[cfg(feature = "serde")]
fn default_n_cpu() -> usize {
    DEFAULT_N_CPU
}
