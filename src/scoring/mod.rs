//! Scoring entry points
//!
//! [`Scorer`] is the per-process scoring service: a predictor injected at
//! construction plus metrics. [`parse_payload`] turns a raw request body
//! into a feature batch, failing at the parse stage for malformed JSON and
//! at the schema stage for anything that is JSON but not a numeric 2-D
//! `data` array.

mod payload;
mod scorer;

pub use payload::parse_payload;
pub use scorer::Scorer;
