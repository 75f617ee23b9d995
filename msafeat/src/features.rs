use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::Parser;
use lib_msafeat::{config::PipelineConfig, pipeline::DataPipeline};
use log::{LevelFilter, debug, info};

use crate::init_logging;


/// The name of the feature file in the output directory.
pub const FEATURES_FILE_NAME: &str = "features.toml";

#[derive(Parser)]
pub struct Cli {
    #[clap(long, short = 'l', default_value = "info")]
    log_level: LevelFilter,

    /// The pipeline configuration in toml format.
    ///
    /// It names the search binaries, the databases and the limits of the pipeline.
    #[clap(long, short = 'c')]
    config: PathBuf,

    /// A fasta file containing exactly one query sequence.
    #[clap(long, short = 'i')]
    input: PathBuf,

    /// The directory to store the raw search outputs and the features in.
    ///
    /// It is created if it does not exist.
    /// Outputs of earlier runs with the same directory are overwritten.
    #[clap(long, short = 'o')]
    output_directory: PathBuf,
}

pub fn cli(cli: Cli) -> Result<()> {
    init_logging(cli.log_level);

    info!("Reading configuration {:?}", cli.config);
    let config = read_config(&cli.config)?;
    debug!("{config:#?}");

    fs::create_dir_all(&cli.output_directory).with_context(|| {
        format!(
            "Error creating output directory {:?}",
            cli.output_directory
        )
    })?;

    let pipeline = DataPipeline::from_config(&config)?;
    let features = pipeline.process(&cli.input, &cli.output_directory)?;

    for (name, feature) in &features {
        info!("{name}: {} {:?}", feature.type_name(), feature.shape());
    }

    let output = cli.output_directory.join(FEATURES_FILE_NAME);
    info!("Writing features to {output:?}");
    let serialised = toml::to_string(&features).context("Error serialising features")?;
    fs::write(&output, serialised).with_context(|| format!("Error writing {output:?}"))?;

    Ok(())
}

pub fn read_config(path: &Path) -> Result<PipelineConfig> {
    let input = fs::read_to_string(path)
        .with_context(|| format!("Error reading configuration file {path:?}"))?;
    toml::from_str(&input).with_context(|| format!("Error parsing configuration file {path:?}"))
}
