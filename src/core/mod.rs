//! Core building blocks shared by the CLI and the library API:
//! recognition parameters and the JSON output emitter.
pub mod params;
pub mod serialize;
