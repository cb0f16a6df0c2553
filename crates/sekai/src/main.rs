//! # Sekai CLI
//!
//! The binary is intentionally thin: everything lives in `src/cli/`, and this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/sekaiapp/`: UI-agnostic core: store, repository, forms, view models
//! - `crates/sekai/`: this client, depends on `sekaiapp`
//!
//! The CLI plays the part of the presentation layer. It opens a form, feeds it
//! the values given as flags, submits once and prints whatever message comes
//! back. No validation or storage rules live here.
//!
//! ## Testing Approach
//!
//! - **Rendering (`cli/render.rs`)**: canned values in, plain strings out, with
//!   colors disabled.
//! - **Parsing (`cli/setup.rs`)**: `Cli::try_parse_from` on argument vectors.
//! - **End to end (`tests/cli_e2e.rs`)**: the real binary over a temporary
//!   `SEKAI_HOME`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
