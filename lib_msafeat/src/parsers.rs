//! Decoders for the text formats written by the search tools.
//!
//! All decoders work on the complete output of a tool and either return every record or fail.
//! Malformed records are never skipped.

pub mod a3m;
pub mod fasta;
pub mod hhr;
pub mod stockholm;
