//! # CLI Behavior
//!
//! This is **one possible UI client** for nvattr, not the parser itself.
//!
//! ## Commands
//!
//! - `nvattr query <ATTR>...`: parse in query mode and show each record.
//! - `nvattr assign <ATTR>...`: parse in assignment mode and show what would
//!   be applied. Nothing is sent to a driver.
//! - `nvattr list [--all]`: the attribute catalog. Without `--all`, entries
//!   excluded from "query all" sweeps are hidden.
//! - `nvattr mask <DEVICES>` / `nvattr mask --from-mask <HEX>`: convert
//!   between display device lists and masks.
//! - `nvattr status [CODE]`: describe parser status codes.
//!
//! Records without an X display pick up the configured default display
//! (`--display`, `-o display=...`, `$DISPLAY` or `nvattr.toml`).
//!
//! ## Module Structure
//!
//! - `commands`: config and logging setup, then one handler per command
//! - `render`: text and JSON output
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styling

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
