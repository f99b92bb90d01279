//! Slot storage for one render call.

use crate::compiler::{Program, Slot};
use crate::interpreter::context::RenderContext;
use crate::interpreter::error::{RenderError, compute_suggestions};
use crate::types::Value;

/// Variable slots for one execution of a [`Program`].
///
/// Slots start empty. Free variables are filled from the render context by
/// the program's bind prefix; loop variables are filled once per iteration
/// and keep their last value after the loop.
pub struct Frame<'a> {
    program: &'a Program,
    context: RenderContext<'a>,
    slots: Vec<Option<Value>>,
}

impl<'a> Frame<'a> {
    pub fn new(program: &'a Program, context: RenderContext<'a>) -> Self {
        Self {
            program,
            context,
            slots: vec![None; program.slot_count()],
        }
    }

    /// Copy a free variable out of the render context.
    ///
    /// A missing name is an error; there is no default.
    pub fn bind_from_context(&mut self, slot: Slot) -> Result<(), RenderError> {
        let name = self.name(slot);
        let Some(value) = self.context.get(name) else {
            return Err(RenderError::UndefinedVariable {
                name: name.to_string(),
                suggestions: compute_suggestions(name, self.context.names()),
            });
        };
        self.set(slot, value.clone());
        Ok(())
    }

    pub fn set(&mut self, slot: Slot, value: Value) {
        if let Some(entry) = self.slots.get_mut(slot.index()) {
            *entry = Some(value);
        }
    }

    pub fn get(&self, slot: Slot) -> Result<&Value, RenderError> {
        self.slots
            .get(slot.index())
            .and_then(Option::as_ref)
            .ok_or_else(|| RenderError::UnboundVariable {
                name: self.name(slot).to_string(),
            })
    }

    /// The variable name behind a slot.
    pub fn name(&self, slot: Slot) -> &'a str {
        self.program.slot_name(slot)
    }
}
