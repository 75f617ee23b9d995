use std::{fs, path::PathBuf, process::Command};

use crate::error::{Error, Result};

use super::{
    TemplateSearchTool, check_hh_database, create_temporary_directory, read_tool_output,
    run_command,
};

const NAME: &str = "hhsearch";

const MAXSEQ: usize = 1_000_000;

/// HMM-HMM search of template databases, reporting an HHR hit list.
#[derive(Debug, Clone)]
pub struct HHSearch {
    binary_path: PathBuf,
    databases: Vec<PathBuf>,
}

impl HHSearch {
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
        })
    }
}

impl TemplateSearchTool for HHSearch {
    fn name(&self) -> &str {
        NAME
    }

    fn query(&self, a3m: &str) -> Result<String> {
        let directory = create_temporary_directory(NAME)?;
        let input_path = directory.path().join("query.a3m");
        let hhr_path = directory.path().join("output.hhr");
        fs::write(&input_path, a3m)
            .map_err(|error| Error::io_at("writing hhsearch input", &input_path, error))?;

        let mut command = Command::new(&self.binary_path);
        command
            .arg("-i")
            .arg(&input_path)
            .arg("-o")
            .arg(&hhr_path)
            .arg("-maxseq")
            .arg(MAXSEQ.to_string());
        for database_path in &self.databases {
            command.arg("-d").arg(database_path);
        }

        run_command(NAME, command)?;
        read_tool_output(NAME, &hhr_path)
    }
}
