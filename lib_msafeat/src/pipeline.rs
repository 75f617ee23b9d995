//! Assembles the input features of one query sequence.

use std::{fs, path::Path};

use log::{info, warn};

use crate::{
    config::{PipelineConfig, TertiarySearchConfig},
    error::{Error, Result},
    features::{Feature, FeatureMap, make_msa_features, make_sequence_features, merge_feature_maps},
    parsers::fasta::parse_single_fasta,
    search::{SearchResults, SearchTools, TertiarySearch, run_searches},
    templates::{HitSummaryFeaturizer, TemplateFeaturizer},
    tools::{HHBlits, HHSearch, Jackhmmer},
};


/// Runs the searches for a query and turns their results into a feature map.
pub struct DataPipeline {
    tools: SearchTools,
    template_featurizer: Box<dyn TemplateFeaturizer>,
    /// Rows of the MGnify MSA that are kept for the merged MSA.
    mgnify_max_hits: usize,
}

impl DataPipeline {
    pub fn new(
        tools: SearchTools,
        template_featurizer: Box<dyn TemplateFeaturizer>,
        mgnify_max_hits: usize,
    ) -> Self {
        Self {
            tools,
            template_featurizer,
            mgnify_max_hits,
        }
    }

    /// Constructs the external search tools named in the configuration.
    ///
    /// Fails if a configured database does not exist.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let tertiary = match &config.tertiary_search {
            TertiarySearchConfig::SmallBfd {
                small_bfd_database_path,
            } => TertiarySearch::SmallBfd(Box::new(jackhmmer(config, small_bfd_database_path)?)),
            TertiarySearchConfig::BfdUniclust {
                bfd_database_path,
                uniclust30_database_path,
            } => TertiarySearch::BfdUniclust(Box::new(
                HHBlits::new(
                    &config.hhblits_binary_path,
                    vec![bfd_database_path.clone(), uniclust30_database_path.clone()],
                )?
                .with_n_cpu(config.n_cpu),
            )),
        };

        let tools = SearchTools {
            uniref90: Box::new(jackhmmer(config, &config.uniref90_database_path)?),
            pdb70: Box::new(HHSearch::new(
                &config.hhsearch_binary_path,
                vec![config.pdb70_database_path.clone()],
            )?),
            mgnify: Box::new(jackhmmer(config, &config.mgnify_database_path)?),
            tertiary,
            uniref_max_hits: config.uniref_max_hits,
        };

        Ok(Self::new(
            tools,
            Box::new(HitSummaryFeaturizer::new(config.max_template_hits)),
            config.mgnify_max_hits,
        ))
    }

    /// Computes the features of the single sequence in `input_fasta_path`.
    ///
    /// The raw search outputs are written to `msa_output_dir`, which must exist.
    pub fn process(&self, input_fasta_path: &Path, msa_output_dir: &Path) -> Result<FeatureMap> {
        let input = fs::read_to_string(input_fasta_path).map_err(|error| {
            Error::Input(format!("Could not read query file {input_fasta_path:?}: {error}"))
        })?;
        let query = parse_single_fasta(&input)?;
        let num_res = query.sequence.chars().count();
        info!("Processing query {:?} of length {num_res}", query.description);

        let SearchResults {
            uniref90_msa,
            template_hits,
            mut mgnify_msa,
            tertiary_msa,
        } = run_searches(&self.tools, input_fasta_path, msa_output_dir)?;

        if mgnify_msa.len() > self.mgnify_max_hits {
            info!(
                "Truncating MGnify MSA from {} to {} sequences",
                mgnify_msa.len(),
                self.mgnify_max_hits
            );
            mgnify_msa.truncate(self.mgnify_max_hits);
        }

        let templates =
            self.template_featurizer
                .get_templates(&query.sequence, None, None, &template_hits)?;
        for warning in &templates.warnings {
            warn!("{warning}");
        }
        for error in &templates.errors {
            warn!("Template error: {error}");
        }

        let sequence_features = make_sequence_features(&query.sequence, &query.description, num_res);
        let msa_features = make_msa_features(&[&uniref90_msa, &tertiary_msa, &mgnify_msa])?;

        info!("Uniref90 MSA size: {} sequences.", uniref90_msa.len());
        info!(
            "{} MSA size: {} sequences.",
            self.tools.tertiary.name(),
            tertiary_msa.len()
        );
        info!("MGnify MSA size: {} sequences.", mgnify_msa.len());
        if let Some(num_alignments) = msa_features
            .get("num_alignments")
            .and_then(Feature::as_int32)
            .and_then(|num_alignments| num_alignments.first().copied())
        {
            info!("Final (deduplicated) MSA size: {num_alignments} sequences.");
        }
        info!(
            "Total number of templates: {} of {} hits.",
            templates
                .features
                .get("template_domain_names")
                .map_or(0, |names| names.shape()[0]),
            template_hits.len()
        );

        merge_feature_maps([sequence_features, msa_features, templates.features])
    }
}

fn jackhmmer(config: &PipelineConfig, database_path: &Path) -> Result<Jackhmmer> {
    Ok(Jackhmmer::new(&config.jackhmmer_binary_path, database_path)?.with_n_cpu(config.n_cpu))
}
