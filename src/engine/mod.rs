//! Core engine: the explore → exploit day loops.

pub mod explorer;
pub mod exploiter;
pub mod ledger;
