use crate::error::{Error, Result};

/// Per-column insertion counts of one aligned sequence.
pub type DeletionRow = Vec<u32>;

/// A multiple sequence alignment as produced by one search.
///
/// Every row of `sequences` has the same number of columns, and the deletion row at the same index
/// has exactly one entry per column.
/// The first row is the query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Msa {
    pub sequences: Vec<String>,
    pub deletion_matrix: Vec<DeletionRow>,
    /// The name or description of each row, as far as the source format has one.
    pub descriptions: Vec<String>,
}

impl Msa {
    /// Creates an MSA after checking that all rows and deletion rows have the width of the first row.
    pub fn new(
        sequences: Vec<String>,
        deletion_matrix: Vec<DeletionRow>,
        descriptions: Vec<String>,
    ) -> Result<Self> {
        if sequences.len() != deletion_matrix.len() || sequences.len() != descriptions.len() {
            return Err(Error::Input(format!(
                "MSA has {} sequences, but {} deletion rows and {} descriptions",
                sequences.len(),
                deletion_matrix.len(),
                descriptions.len()
            )));
        }

        let result = Self {
            sequences,
            deletion_matrix,
            descriptions,
        };
        result.check_widths()?;
        Ok(result)
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// The number of aligned columns, or `None` for an empty MSA.
    pub fn width(&self) -> Option<usize> {
        self.sequences.first().map(|sequence| sequence.chars().count())
    }

    /// Keeps only the first `max_sequences` rows.
    pub fn truncate(&mut self, max_sequences: usize) {
        self.sequences.truncate(max_sequences);
        self.deletion_matrix.truncate(max_sequences);
        self.descriptions.truncate(max_sequences);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeletionRow)> {
        self.sequences
            .iter()
            .map(String::as_str)
            .zip(&self.deletion_matrix)
    }

    pub fn check_widths(&self) -> Result<()> {
        let Some(width) = self.width() else {
            return Ok(());
        };

        for (index, (sequence, deletion_row)) in self.iter().enumerate() {
            let sequence_width = sequence.chars().count();
            if sequence_width != width {
                return Err(Error::Input(format!(
                    "MSA row {index} has {sequence_width} columns, but the query has {width}"
                )));
            }
            if deletion_row.len() != width {
                return Err(Error::Input(format!(
                    "Deletion row {index} has {} entries, but the MSA has {width} columns",
                    deletion_row.len()
                )));
            }
        }

        Ok(())
    }
}
