use std::collections::HashSet;

use ndarray::{Array1, Array2};

use crate::{
    error::{Error, Result},
    msa::Msa,
    residue_constants::msa_residue_id,
};

use super::{Feature, FeatureMap};

/// Merges the given MSAs into one deduplicated block and encodes it.
///
/// Rows are kept in the order in which their aligned sequence is first encountered,
/// walking the MSAs in the given order.
/// A repeated sequence is dropped together with its deletion row.
pub fn make_msa_features(msas: &[&Msa]) -> Result<FeatureMap> {
    let Some(first_msa) = msas.first() else {
        return Err(Error::Input(
            "At least one MSA must be provided.".to_string(),
        ));
    };
    if let Some(msa_index) = msas.iter().position(|msa| msa.is_empty()) {
        return Err(Error::Input(format!(
            "MSA {msa_index} must contain at least one sequence."
        )));
    }
    let num_res = first_msa.width().unwrap_or_default();

    let mut seen_sequences = HashSet::new();
    let mut int_msa = Vec::new();
    let mut deletion_matrix = Vec::new();

    for (msa_index, msa) in msas.iter().enumerate() {
        for (sequence_index, (sequence, deletion_row)) in msa.iter().enumerate() {
            if !seen_sequences.insert(sequence) {
                continue;
            }

            if sequence.chars().count() != num_res || deletion_row.len() != num_res {
                return Err(Error::Input(format!(
                    "Sequence {sequence_index} of MSA {msa_index} has {} columns and {} deletion values, but the first MSA has {num_res} columns",
                    sequence.chars().count(),
                    deletion_row.len()
                )));
            }

            for residue in sequence.chars() {
                int_msa.push(msa_residue_id(residue).ok_or_else(|| {
                    Error::Input(format!(
                        "Sequence {sequence_index} of MSA {msa_index} contains the unsupported residue '{residue}'"
                    ))
                })?);
            }
            deletion_matrix.extend(deletion_row.iter().map(|&deletions| deletions as i32));
        }
    }

    let num_alignments = seen_sequences.len();
    let shape = (num_alignments, num_res);
    let int_msa = Array2::from_shape_vec(shape, int_msa)
        .map_err(|error| Error::Input(format!("Could not shape the MSA: {error}")))?;
    let deletion_matrix = Array2::from_shape_vec(shape, deletion_matrix)
        .map_err(|error| Error::Input(format!("Could not shape the deletion matrix: {error}")))?;

    Ok(FeatureMap::from([
        (
            "deletion_matrix_int".to_string(),
            Feature::Int32(deletion_matrix.into_dyn()),
        ),
        ("msa".to_string(), Feature::Int32(int_msa.into_dyn())),
        (
            "num_alignments".to_string(),
            Feature::Int32(Array1::from_elem(num_res, num_alignments as i32).into_dyn()),
        ),
    ]))
}
