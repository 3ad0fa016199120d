//! Ledger table library
//!
//! Sort, group, and paginate views over business records (time entries,
//! invoices, clients, tax prepayments, backups).

pub mod config;
pub mod error;
pub mod model;
pub mod table;
