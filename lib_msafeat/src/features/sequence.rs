use ndarray::{Array1, Array2};

use crate::residue_constants::{RESTYPE_NUM_WITH_X, restype_order_with_x};

use super::{Feature, FeatureMap};

/// Builds the per-residue features of a single query sequence.
///
/// Residues outside of the standard alphabet are encoded with the unknown class.
///
/// # Panics
///
/// Panics if `num_res` is not the number of residues in `sequence`.
pub fn make_sequence_features(sequence: &str, description: &str, num_res: usize) -> FeatureMap {
    assert_eq!(
        sequence.chars().count(),
        num_res,
        "The residue count does not match the sequence"
    );

    let mut aatype = Array2::<i32>::zeros((num_res, RESTYPE_NUM_WITH_X));
    for (position, residue) in sequence.chars().enumerate() {
        aatype[[position, restype_order_with_x(residue)]] = 1;
    }

    let num_res_i32 = num_res as i32;
    FeatureMap::from([
        ("aatype".to_string(), Feature::Int32(aatype.into_dyn())),
        (
            "between_segment_residues".to_string(),
            Feature::Int32(Array1::<i32>::zeros(num_res).into_dyn()),
        ),
        (
            "domain_name".to_string(),
            Feature::Bytes(vec![description.as_bytes().to_vec()]),
        ),
        (
            "residue_index".to_string(),
            Feature::Int32(Array1::from_iter(0..num_res_i32).into_dyn()),
        ),
        (
            "seq_length".to_string(),
            Feature::Int32(Array1::from_elem(num_res, num_res_i32).into_dyn()),
        ),
        (
            "sequence".to_string(),
            Feature::Bytes(vec![sequence.as_bytes().to_vec()]),
        ),
    ])
}
