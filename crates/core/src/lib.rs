//! Core accounting logic for Obra.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, posting rules, and validations live here.
//!
//! # Modules
//!
//! - `chart` - Construction-industry chart of accounts template
//! - `rubro` - Category (rubro) to account-code routing
//! - `journal` - Balanced journal entries and per-event posting rules

pub mod chart;
pub mod journal;
pub mod rubro;
