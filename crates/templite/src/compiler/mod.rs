//! Two-pass template compiler.
//!
//! The first pass ([`analyze`]) validates tags and block nesting and collects
//! every referenced name. The second pass ([`emit`]) lowers the result into a
//! [`Program`] whose first instructions bind the free names from the render
//! context.

mod blocks;
mod program;

pub use blocks::{Analysis, BlockKind, BlockStack, Event, analyze};
pub use program::{Fragment, Instruction, Operand, Program, Slot, emit};
