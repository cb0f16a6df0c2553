//! # CLI Behavior
//!
//! This is **one possible UI client** for sekai, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes and output
//! formatting.
//!
//! ## Naked Execution (`sekai`)
//!
//! Running `sekai` with no arguments lists the collection.
//!
//! ## Forms From Flags
//!
//! `add` and `edit` drive a `FormSession`: every flag given becomes a field
//! change, then the form is submitted once. If the draft is invalid the field
//! errors are printed and the process exits with status 1; nothing is written.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting (list lines, detail blocks, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
