//! Core business logic for BizLink.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All credit rules, validation, and balance arithmetic live here; the db crate
//! applies them inside a locked unit of work.
//!
//! # Modules
//!
//! - `credit` - Company credit ledger (earn, spend, balance invariants)
//! - `promotion` - Service promotion transitions and their settlement fee

pub mod credit;
pub mod promotion;
