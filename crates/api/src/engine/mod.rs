//! Solicitud status and progress engine.
//!
//! Glues the pure rules in `admisiones_core` (state machine, progress
//! checklist) to the repositories that load and persist solicitudes.

pub mod progress;
pub mod transitions;
