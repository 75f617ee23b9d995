use std::{
    path::{Path, PathBuf},
    process::Command,
};

use crate::error::{Error, Result};

use super::{MsaSearchTool, create_temporary_directory, read_tool_output, run_command};

const NAME: &str = "jackhmmer";

const N_ITER: usize = 1;
const E_VALUE: f64 = 0.0001;
const FILTER_F1: f64 = 0.0005;
const FILTER_F2: f64 = 0.00005;
const FILTER_F3: f64 = 0.0000005;

/// Iterative profile search of a single sequence database, reporting a Stockholm alignment.
#[derive(Debug, Clone)]
pub struct Jackhmmer {
    binary_path: PathBuf,
    database_path: PathBuf,
    n_cpu: usize,
}

impl Jackhmmer {
    pub fn new(binary_path: impl Into<PathBuf>, database_path: impl Into<PathBuf>) -> Result<Self> {
        let database_path = database_path.into();
        if !database_path.exists() {
            return Err(Error::Input(format!(
                "{NAME} could not find database {database_path:?}"
            )));
        }

        Ok(Self {
            binary_path: binary_path.into(),
            database_path,
            n_cpu: 8,
        })
    }

    pub fn with_n_cpu(mut self, n_cpu: usize) -> Self {
        self.n_cpu = n_cpu;
        self
    }
}

impl MsaSearchTool for Jackhmmer {
    fn name(&self) -> &str {
        NAME
    }

    fn query(&self, input_fasta_path: &Path) -> Result<String> {
        let directory = create_temporary_directory(NAME)?;
        let sto_path = directory.path().join("output.sto");

        let mut command = Command::new(&self.binary_path);
        // Alignments are not needed in the main output, only the Stockholm file.
        command
            .args(["-o", "/dev/null", "-A"])
            .arg(&sto_path)
            .arg("--noali")
            .arg("--F1")
            .arg(FILTER_F1.to_string())
            .arg("--F2")
            .arg(FILTER_F2.to_string())
            .arg("--F3")
            .arg(FILTER_F3.to_string())
            .arg("--incE")
            .arg(E_VALUE.to_string())
            .arg("-E")
            .arg(E_VALUE.to_string())
            .arg("--cpu")
            .arg(self.n_cpu.to_string())
            .arg("-N")
            .arg(N_ITER.to_string())
            .arg(input_fasta_path)
            .arg(&self.database_path);

        run_command(&format!("{NAME} ({:?})", self.database_path), command)?;
        read_tool_output(NAME, &sto_path)
    }
}
