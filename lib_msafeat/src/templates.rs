use ndarray::{Array1, Array2};

use crate::{
    error::Result,
    features::{Feature, FeatureMap},
    parsers::hhr::TemplateHit,
};


/// The result of featurising template hits.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateSearchResult {
    pub features: FeatureMap,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

/// Turns the hits of a template search into template features.
pub trait TemplateFeaturizer: Send + Sync {
    /// The hints restrict templates to those released before the query.
    /// If both are `None`, any template may be used.
    fn get_templates(
        &self,
        query_sequence: &str,
        query_pdb_code: Option<&str>,
        query_release_date: Option<&str>,
        hits: &[TemplateHit],
    ) -> Result<TemplateSearchResult>;
}

/// Featurises template hits from the hit report alone, without looking up template structures.
///
/// Emits `template_domain_names`, `template_sum_probs` and `template_aligned_cols`
/// for at most `max_hits` hits in report order.
#[derive(Debug, Clone)]
pub struct HitSummaryFeaturizer {
    pub max_hits: usize,
}

impl HitSummaryFeaturizer {
    pub fn new(max_hits: usize) -> Self {
        Self { max_hits }
    }
}

impl TemplateFeaturizer for HitSummaryFeaturizer {
    fn get_templates(
        &self,
        query_sequence: &str,
        query_pdb_code: Option<&str>,
        query_release_date: Option<&str>,
        hits: &[TemplateHit],
    ) -> Result<TemplateSearchResult> {
        let mut warnings = Vec::new();
        if query_pdb_code.is_some() || query_release_date.is_some() {
            warnings.push(
                "Release date filtering is not supported, all hits are considered".to_string(),
            );
        }

        let query_length = query_sequence.chars().count();
        let mut selected = Vec::new();
        for hit in hits {
            if selected.len() >= self.max_hits {
                break;
            }
            if hit.indices_query.iter().flatten().any(|&index| index >= query_length) {
                warnings.push(format!(
                    "Skipping hit {} ({}): it aligns beyond the end of the query",
                    hit.index, hit.name
                ));
                continue;
            }
            selected.push(hit);
        }

        let domain_names = selected
            .iter()
            .map(|hit| {
                hit.name
                    .split_whitespace()
                    .next()
                    .unwrap_or_default()
                    .as_bytes()
                    .to_vec()
            })
            .collect();
        let sum_probs = Array2::from_shape_fn((selected.len(), 1), |(index, _)| {
            selected[index].sum_probs as f32
        });
        let aligned_cols = Array1::from_iter(selected.iter().map(|hit| hit.aligned_cols as i32));

        Ok(TemplateSearchResult {
            features: FeatureMap::from([
                (
                    "template_domain_names".to_string(),
                    Feature::Bytes(domain_names),
                ),
                (
                    "template_sum_probs".to_string(),
                    Feature::Float32(sum_probs.into_dyn()),
                ),
                (
                    "template_aligned_cols".to_string(),
                    Feature::Int32(aligned_cols.into_dyn()),
                ),
            ]),
            errors: Vec::new(),
            warnings,
        })
    }
}
