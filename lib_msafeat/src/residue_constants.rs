/// The standard amino acids in the order of the one-hot encoding.
pub const RESTYPES: [char; 20] = [
    'A', 'R', 'N', 'D', 'C', 'Q', 'E', 'G', 'H', 'I', 'L', 'K', 'M', 'F', 'P', 'S', 'T', 'W', 'Y',
    'V',
];

/// The one-hot class of residues that are not one of [`RESTYPES`].
pub const UNKNOWN_RESTYPE_INDEX: usize = RESTYPES.len();

/// The number of one-hot classes, including the unknown class.
pub const RESTYPE_NUM_WITH_X: usize = RESTYPES.len() + 1;

/// The integer used in MSA rows for gaps.
pub const MSA_GAP_ID: i32 = 21;

/// Maps a residue to its one-hot class, sending everything unknown to [`UNKNOWN_RESTYPE_INDEX`].
pub fn restype_order_with_x(residue: char) -> usize {
    RESTYPES
        .iter()
        .position(|&restype| restype == residue)
        .unwrap_or(UNKNOWN_RESTYPE_INDEX)
}

/// Maps a residue of an MSA row to its integer id.
///
/// The ids are ordered alphabetically by one-letter code, with ambiguity codes mapped to their closest standard residue.
pub fn msa_residue_id(residue: char) -> Option<i32> {
    Some(match residue {
        'A' => 0,
        'B' => 2,
        'C' => 1,
        'D' => 2,
        'E' => 3,
        'F' => 4,
        'G' => 5,
        'H' => 6,
        'I' => 7,
        'J' => 20,
        'K' => 8,
        'L' => 9,
        'M' => 10,
        'N' => 11,
        'O' => 20,
        'P' => 12,
        'Q' => 13,
        'R' => 14,
        'S' => 15,
        'T' => 16,
        'U' => 1,
        'V' => 17,
        'W' => 18,
        'X' => 20,
        'Y' => 19,
        'Z' => 3,
        '-' => MSA_GAP_ID,
        _ => return None,
    })
}
