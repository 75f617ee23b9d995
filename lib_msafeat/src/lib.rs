//! Turns a protein query sequence into the input features of a structure model.
//!
//! The [`pipeline::DataPipeline`] searches several sequence databases concurrently with external tools,
//! parses their alignments and template hits, and merges everything into one [`features::FeatureMap`].

pub mod config;
pub mod error;
pub mod features;
mod io;
pub mod msa;
pub mod parsers;
pub mod pipeline;
pub mod residue_constants;
pub mod search;
pub mod templates;
pub mod tools;
