//! Fit scoring and ranking core

pub mod record;
pub mod skills;
pub mod qualification;
pub mod category;
pub mod scorer;
pub mod ranker;
pub mod shortlist;
