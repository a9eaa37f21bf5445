//! Configuration loading and resolution utilities.
//!
//! Values are layered from default config files, explicit `--config` files,
//! `HISTMERGE__*` environment variables and finally CLI flags. `load` is the
//! primary entry point and returns a [`ResolvedConfig`] used by the workflow.

mod loader;
mod raw;
mod resolved;
mod sources;
mod util;

pub use loader::load;
pub use resolved::ResolvedConfig;
