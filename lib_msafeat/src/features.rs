use std::collections::BTreeMap;

use ndarray::ArrayD;

use crate::error::{Error, Result};

pub use msa::make_msa_features;
pub use sequence::make_sequence_features;

mod msa;
mod sequence;

#[cfg(test)]
mod tests;

/// The input features of a structure model, by name.
pub type FeatureMap = BTreeMap<String, Feature>;

/// A single named input feature.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Feature {
    Int32(ArrayD<i32>),
    Float32(ArrayD<f32>),
    /// Opaque byte strings, such as the encoded query sequence.
    Bytes(Vec<Vec<u8>>),
}

impl Feature {
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Self::Int32(array) => array.shape().to_vec(),
            Self::Float32(array) => array.shape().to_vec(),
            Self::Bytes(bytes) => vec![bytes.len()],
        }
    }

    pub fn as_int32(&self) -> Option<&ArrayD<i32>> {
        match self {
            Self::Int32(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_float32(&self) -> Option<&ArrayD<f32>> {
        match self {
            Self::Float32(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[Vec<u8>]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Int32(_) => "int32",
            Self::Float32(_) => "float32",
            Self::Bytes(_) => "bytes",
        }
    }
}

/// Combines feature maps whose key sets are disjoint.
pub fn merge_feature_maps(maps: impl IntoIterator<Item = FeatureMap>) -> Result<FeatureMap> {
    let mut result = FeatureMap::new();
    for map in maps {
        for (name, feature) in map {
            if result.contains_key(&name) {
                return Err(Error::DuplicateFeature(name));
            }
            result.insert(name, feature);
        }
    }

    Ok(result)
}
