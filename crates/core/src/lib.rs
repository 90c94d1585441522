//! Admissions portal domain layer.
//!
//! Pure logic only: shared types, the domain error enum, catalog label sets,
//! field validators, the solicitud state machine and the progress
//! calculator. Nothing in this crate touches the database or HTTP.

pub mod catalog;
pub mod error;
pub mod estado;
pub mod info_academica;
pub mod info_personal;
pub mod naming;
pub mod pagination;
pub mod progress;
pub mod registro;
pub mod roles;
pub mod solicitud;
pub mod types;
pub mod validation;
