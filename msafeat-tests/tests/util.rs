use std::{
    env,
    fs::{self, Permissions},
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
};

use anyhow::{Result, anyhow};
use clap::Parser;
use msafeat::{features, inspect};
use tempfile::TempDir;

pub fn repo_root() -> Result<PathBuf> {
    // the manifest directory is this crate, a.k.a. "[...]/msafeat/msafeat-tests"
    Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .ok_or(anyhow!("No parent directory"))?
        .to_path_buf())
}

/// Runs a subcommand of the CLI from the repository root.
///
/// Arguments are separated by whitespace, so paths must not contain any.
pub fn run_in_repo_root(args: &str) -> Result<()> {
    env::set_current_dir(repo_root()?)?;

    if args.starts_with("features ") {
        let args = features::Cli::parse_from(args.split_whitespace());
        features::cli(args)
    } else if args.starts_with("inspect ") {
        let args = inspect::Cli::parse_from(args.split_whitespace());
        inspect::cli(args)
    } else {
        Err(anyhow!("Unknown subcommand in {args:?}"))
    }
}

/// Copies each database fixture search result next to the database file, where the fake tools find it.
const FAKE_JACKHMMER: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
    case "$1" in
        -A) output="$2"; shift 2 ;;
        *) database="$1"; shift ;;
    esac
done
case "$database" in
    *broken*) echo "corrupt database $database" >&2; exit 1 ;;
esac
cp "$database.sto" "$output"
"#;

const FAKE_HHBLITS: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
    case "$1" in
        -oa3m) output="$2"; shift 2 ;;
        -d) database="${database:-$2}"; shift 2 ;;
        *) shift ;;
    esac
done
cp "$database.a3m" "$output"
"#;

const FAKE_HHSEARCH: &str = r#"#!/bin/sh
while [ $# -gt 0 ]; do
    case "$1" in
        -i) input="$2"; shift 2 ;;
        -o) output="$2"; shift 2 ;;
        -d) database="$2"; shift 2 ;;
        *) shift ;;
    esac
done
head -n 1 "$input" | grep -q '^>' || exit 1
cp "$database.hhr" "$output"
"#;

/// A temporary installation of fake search tools and databases.
pub struct FakeInstallation {
    pub directory: TempDir,
}

impl FakeInstallation {
    /// Sets up fake binaries and databases whose searches report the files in `test_files`.
    ///
    /// If `broken_mgnify` is set, the MGnify search fails.
    pub fn new(broken_mgnify: bool) -> Result<Self> {
        let directory = tempfile::Builder::new().prefix("msafeat-").tempdir()?;
        let installation = Self { directory };
        let test_files = repo_root()?.join("test_files");

        installation.write_script("jackhmmer", FAKE_JACKHMMER)?;
        installation.write_script("hhblits", FAKE_HHBLITS)?;
        installation.write_script("hhsearch", FAKE_HHSEARCH)?;

        let mgnify = if broken_mgnify {
            "mgnify_broken.fa"
        } else {
            "mgnify.fa"
        };
        for (database, fixture) in [
            ("uniref90.fasta", "uniref90.sto"),
            (mgnify, "mgnify.sto"),
            ("small_bfd.fasta", "small_bfd.sto"),
        ] {
            fs::write(installation.path(database), "")?;
            fs::copy(
                test_files.join(fixture),
                installation.path(&format!("{database}.sto")),
            )?;
        }

        for index_file in ["pdb70_hhm.ffindex", "bfd_a3m.ffindex", "uniclust30_a3m.ffindex"] {
            fs::write(installation.path(index_file), "")?;
        }
        fs::copy(test_files.join("pdb70.hhr"), installation.path("pdb70.hhr"))?;
        fs::copy(
            test_files.join("bfd_uniclust.a3m"),
            installation.path("bfd.a3m"),
        )?;

        Ok(installation)
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.directory.path().join(name)
    }

    fn write_script(&self, name: &str, content: &str) -> Result<()> {
        let path = self.path(name);
        fs::write(&path, content)?;
        fs::set_permissions(&path, Permissions::from_mode(0o755))?;
        Ok(())
    }

    /// Writes a pipeline configuration using the fake tools and returns its path.
    pub fn write_config(&self, use_small_bfd: bool, extra: &str) -> Result<PathBuf> {
        let mgnify = if self.path("mgnify_broken.fa").exists() {
            "mgnify_broken.fa"
        } else {
            "mgnify.fa"
        };
        let tertiary_search = if use_small_bfd {
            format!(
                "small_bfd_database_path = '{}'",
                self.path("small_bfd.fasta").display()
            )
        } else {
            format!(
                "bfd_database_path = '{}'\nuniclust30_database_path = '{}'",
                self.path("bfd").display(),
                self.path("uniclust30").display()
            )
        };

        let config = format!(
            "jackhmmer_binary_path = '{}'
hhblits_binary_path = '{}'
hhsearch_binary_path = '{}'
uniref90_database_path = '{}'
mgnify_database_path = '{}'
pdb70_database_path = '{}'
n_cpu = 1
{extra}

[tertiary_search]
{tertiary_search}
",
            self.path("jackhmmer").display(),
            self.path("hhblits").display(),
            self.path("hhsearch").display(),
            self.path("uniref90.fasta").display(),
            self.path(mgnify).display(),
            self.path("pdb70").display(),
        );

        let path = self.path("config.toml");
        fs::write(&path, config)?;
        Ok(path)
    }
}
