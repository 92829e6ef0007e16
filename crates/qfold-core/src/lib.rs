//! # qfold Core Library
//!
//! A library for quantifying native-contact formation in molecular-dynamics
//! trajectories: it groups a reference ("native") contact map into spatially
//! coherent clusters, evaluates which contacts are formed in each trajectory
//! frame, aggregates the per-frame results into fixed-size time windows, and
//! infers the chronological order in which the clusters stabilize.
//!
//! ## Architectural Philosophy
//!
//! The library is organized in three layers with a strict separation of
//! concerns:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Contact`,
//!   `ContactSet`, `Frame`, `FrameResult`, `WindowSummary`) and the table /
//!   structure-file I/O that moves them in and out of the process.
//!
//! - **[`engine`]: The Logic Core.** The analysis algorithms: adjacency-based
//!   contact clustering with a pluggable two-way split strategy, per-frame
//!   contact evaluation, trajectory scanning, window summarization, running
//!   averages, and the backward-scan formation-order classifier.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that tie the
//!   `engine` and `core` together, from a raw contact table or a multi-model
//!   PDB trajectory down to the persisted result tables and the formation
//!   order record.

pub mod core;
pub mod engine;
pub mod workflows;
