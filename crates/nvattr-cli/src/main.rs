//! # nvattr CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/nvattr/`: the parser library, UI agnostic
//! - `crates/nvattr-cli/`: this client, depends on the `nvattr` library
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/nvattr-cli/src/cli/)                     │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config, logging and dispatch (commands.rs)               │
//! │  - Text and JSON output (render.rs, styles.rs)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (crates/nvattr)                                    │
//! │  - parse_attribute_string → ParsedAttribute | ParseError    │
//! │  - Catalog, display masks, status codes, config             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI is the only place that knows about stdout/stderr and exit codes.
//! Any attribute string that fails to parse makes the process exit with 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
