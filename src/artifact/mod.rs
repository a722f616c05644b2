//! On-disk pack assembly.
//!
//! - [`stage`] - lay the pack out in a temporary directory
//! - [`archive`] - zip that directory into `<name>.mcpack`
//! - [`cleanup`] - remove the temporary directory afterwards
//! - [`filesystem`] - small file helpers shared by the above

pub mod archive;
pub mod cleanup;
pub mod filesystem;
pub mod stage;
