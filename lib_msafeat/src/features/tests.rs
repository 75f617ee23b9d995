use ndarray::{Array1, Array2, ArrayD, Axis};

use crate::{
    error::Error,
    msa::Msa,
    residue_constants::{RESTYPE_NUM_WITH_X, UNKNOWN_RESTYPE_INDEX},
};

use super::{Feature, FeatureMap, make_msa_features, make_sequence_features, merge_feature_maps};

fn msa(rows: &[(&str, &[u32])]) -> Msa {
    Msa::new(
        rows.iter().map(|(sequence, _)| sequence.to_string()).collect(),
        rows.iter().map(|(_, deletions)| deletions.to_vec()).collect(),
        (0..rows.len()).map(|index| format!("row{index}")).collect(),
    )
    .unwrap()
}

fn int32(features: &FeatureMap, name: &str) -> ArrayD<i32> {
    features[name].as_int32().unwrap().clone()
}

#[test]
fn sequence_features_of_short_query() {
    let features = make_sequence_features("ACDE", "q1", 4);

    assert_eq!(
        int32(&features, "residue_index"),
        Array1::from(vec![0, 1, 2, 3]).into_dyn()
    );
    assert_eq!(
        int32(&features, "seq_length"),
        Array1::from(vec![4, 4, 4, 4]).into_dyn()
    );
    assert_eq!(
        int32(&features, "between_segment_residues"),
        Array1::from(vec![0, 0, 0, 0]).into_dyn()
    );
    assert_eq!(features["aatype"].shape(), vec![4, RESTYPE_NUM_WITH_X]);
    assert_eq!(
        features["domain_name"].as_bytes().unwrap(),
        &[b"q1".to_vec()][..]
    );
    assert_eq!(
        features["sequence"].as_bytes().unwrap(),
        &[b"ACDE".to_vec()][..]
    );
}

#[test]
fn one_hot_has_one_entry_per_row() {
    let sequence = "ARNDCQEGHILKMFPSTWYVXBZ*";
    let num_res = sequence.len();
    let features = make_sequence_features(sequence, "all residues", num_res);
    let aatype = int32(&features, "aatype");

    for (position, row) in aatype.axis_iter(Axis(0)).enumerate() {
        assert_eq!(row.sum(), 1, "row {position}");
    }

    // The standard residues are encoded in order, everything else is unknown.
    for position in 0..20 {
        assert_eq!(aatype[[position, position]], 1);
    }
    for position in 20..num_res {
        assert_eq!(aatype[[position, UNKNOWN_RESTYPE_INDEX]], 1);
    }
}

#[test]
#[should_panic]
fn sequence_features_with_wrong_residue_count() {
    make_sequence_features("ACDE", "q1", 5);
}

#[test]
fn msa_features_keep_first_occurrence() {
    let first = msa(&[("ACDE", &[0, 0, 0, 0])]);
    let second = msa(&[("ACDE", &[0, 0, 0, 0]), ("ACDF", &[1, 0, 0, 0])]);
    let features = make_msa_features(&[&first, &second]).unwrap();

    assert_eq!(
        int32(&features, "msa"),
        Array2::from(vec![[0, 1, 2, 3], [0, 1, 2, 4]]).into_dyn()
    );
    assert_eq!(
        int32(&features, "deletion_matrix_int"),
        Array2::from(vec![[0, 0, 0, 0], [1, 0, 0, 0]]).into_dyn()
    );
    assert_eq!(
        int32(&features, "num_alignments"),
        Array1::from(vec![2, 2, 2, 2]).into_dyn()
    );
}

#[test]
fn msa_features_of_later_duplicate_keep_first_deletions() {
    let first = msa(&[("AC-E", &[0, 0, 0, 3]), ("ACDE", &[0, 0, 0, 0])]);
    let second = msa(&[("ACDE", &[0, 0, 0, 0]), ("AC-E", &[2, 0, 0, 0])]);
    let features = make_msa_features(&[&first, &second]).unwrap();

    assert_eq!(
        int32(&features, "msa"),
        Array2::from(vec![[0, 1, 21, 3], [0, 1, 2, 3]]).into_dyn()
    );
    assert_eq!(
        int32(&features, "deletion_matrix_int"),
        Array2::from(vec![[0, 0, 0, 3], [0, 0, 0, 0]]).into_dyn()
    );
}

#[test]
fn msa_features_are_idempotent_under_repetition() {
    let first = msa(&[("ACDE", &[0, 0, 0, 0]), ("A-DE", &[0, 0, 1, 0])]);
    let second = msa(&[("ACDF", &[1, 0, 0, 0]), ("ACDE", &[0, 0, 0, 0])]);

    let once = make_msa_features(&[&first, &second]).unwrap();
    let twice = make_msa_features(&[&first, &second, &first, &second]).unwrap();
    assert_eq!(once, twice);
    assert_eq!(once["msa"].shape(), vec![3, 4]);
}

#[test]
fn msa_features_require_an_msa() {
    let error = make_msa_features(&[]).unwrap_err();
    assert!(matches!(error, Error::Input(_)));
}

#[test]
fn msa_features_reject_empty_msa() {
    let first = msa(&[("ACDE", &[0, 0, 0, 0])]);
    let empty = Msa::default();
    let error = make_msa_features(&[&first, &empty]).unwrap_err();
    assert!(matches!(error, Error::Input(message) if message.contains("MSA 1")));
}

#[test]
fn msa_features_reject_width_mismatch() {
    let first = msa(&[("ACDE", &[0, 0, 0, 0])]);
    let second = msa(&[("ACD", &[0, 0, 0])]);
    let error = make_msa_features(&[&first, &second]).unwrap_err();
    assert!(matches!(error, Error::Input(_)));
}

#[test]
fn msa_features_reject_unknown_residue() {
    let first = msa(&[("AC*E", &[0, 0, 0, 0])]);
    let error = make_msa_features(&[&first]).unwrap_err();
    assert!(matches!(error, Error::Input(_)));
}

#[test]
fn merging_disjoint_maps() {
    let sequence_features = make_sequence_features("ACDE", "q1", 4);
    let msa_features = make_msa_features(&[&msa(&[("ACDE", &[0, 0, 0, 0])])]).unwrap();
    let merged = merge_feature_maps([sequence_features, msa_features]).unwrap();

    assert_eq!(
        merged.keys().map(String::as_str).collect::<Vec<_>>(),
        vec![
            "aatype",
            "between_segment_residues",
            "deletion_matrix_int",
            "domain_name",
            "msa",
            "num_alignments",
            "residue_index",
            "seq_length",
            "sequence"
        ]
    );
}

#[test]
fn merging_colliding_maps() {
    let first = FeatureMap::from([(
        "msa".to_string(),
        Feature::Bytes(vec![b"first".to_vec()]),
    )]);
    let second = FeatureMap::from([(
        "msa".to_string(),
        Feature::Bytes(vec![b"second".to_vec()]),
    )]);
    let error = merge_feature_maps([first, second]).unwrap_err();
    assert!(matches!(error, Error::DuplicateFeature(name) if name == "msa"));
}
