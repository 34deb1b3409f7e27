//! kitec-util - Shared foundations of the Kite toolchain.
//!
//! This crate holds the pieces every later phase needs: source positions,
//! type designators, and the error taxonomy. It sits at the bottom of the
//! dependency chain (util → lex → par → int → drv) and depends on nothing
//! but `thiserror`.

pub mod error;
pub mod position;
pub mod types;

pub use error::{KiteError, Result};
pub use position::Position;
pub use types::{BuiltInType, RetType, TypeSpec};
