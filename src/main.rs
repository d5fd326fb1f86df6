//! DOCREC CLI entrypoint.
//!
//! Provides a thin wrapper over the `cli` module: parse args, run the
//! single-shot recognition flow, and exit with appropriate status. Both
//! usage errors and engine failures exit with status -1, matching the
//! contract consumed by downstream tooling. For programmatic use, prefer
//! the library API (`docrec::api`).

use clap::Parser;

mod cli;

fn main() {
    let args = match cli::CliArgs::try_parse() {
        Ok(args) => args,
        Err(_) => {
            let program = std::env::args()
                .next()
                .unwrap_or_else(|| "docrec".to_string());
            println!(
                "Version {}. Usage: {} <image_path> <bundle_path> [document_types]",
                docrec::ENGINE_VERSION,
                program
            );
            std::process::exit(-1);
        }
    };

    if let Err(e) = cli::run(args) {
        println!("Error: {e}");
        std::process::exit(-1);
    }
}
