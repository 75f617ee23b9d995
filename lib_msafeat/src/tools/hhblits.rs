use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::{Error, Result};

use super::{
    MsaSearchTool, check_hh_database, create_temporary_directory, read_tool_output, run_command,
};

const NAME: &str = "hhblits";

const N_ITER: usize = 3;
const E_VALUE: f64 = 0.001;
const MAXSEQ: usize = 1_000_000;
const REALIGN_MAX: usize = 100_000;
const MAXFILT: usize = 100_000;
const MIN_PREFILTER_HITS: usize = 1000;

/// HMM-HMM search of one or more HH-suite databases, reporting an A3M alignment.
#[derive(Debug, Clone)]
pub struct HHBlits {
    binary_path: PathBuf,
    databases: Vec<PathBuf>,
    n_cpu: usize,
}

impl HHBlits {
    pub fn new(binary_path: impl Into<PathBuf>, databases: Vec<PathBuf>) -> Result<Self> {
        if databases.is_empty() {
            return Err(Error::Input(format!("{NAME} requires at least one database")));
        }
        for database_path in &databases {
            check_hh_database(NAME, database_path)?;
        }

        Ok(Self {
            binary_path: binary_path.into(),
            databases,
            n_cpu: 4,
        })
    }

    pub fn with_n_cpu(mut self, n_cpu: usize) -> Self {
        self.n_cpu = n_cpu;
        self
    }
}

impl MsaSearchTool for HHBlits {
    fn name(&self) -> &str {
        NAME
    }

    fn query(&self, input_fasta_path: &Path) -> Result<String> {
        let directory = create_temporary_directory(NAME)?;
        let a3m_path = directory.path().join("output.a3m");

        let mut command = Command::new(&self.binary_path);
        command
            .arg("-i")
            .arg(input_fasta_path)
            .arg("-cpu")
            .arg(self.n_cpu.to_string())
            .arg("-oa3m")
            .arg(&a3m_path)
            .args(["-o", "/dev/null"])
            .arg("-n")
            .arg(N_ITER.to_string())
            .arg("-e")
            .arg(E_VALUE.to_string())
            .arg("-maxseq")
            .arg(MAXSEQ.to_string())
            .arg("-realign_max")
            .arg(REALIGN_MAX.to_string())
            .arg("-maxfilt")
            .arg(MAXFILT.to_string())
            .arg("-min_prefilter_hits")
            .arg(MIN_PREFILTER_HITS.to_string());
        for database_path in &self.databases {
            command.arg("-d").arg(database_path);
        }

        run_command(NAME, command)?;
        read_tool_output(NAME, &a3m_path)
    }
}
