//! Command Line Interface (CLI) layer for DOCREC.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) for the single-shot recognition
//! flow. It wires user-provided paths to the underlying library
//! functionality exposed via `docrec::api`.
//!
//! If you are embedding DOCREC into another application, prefer using the
//! high-level `docrec::api` module instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
