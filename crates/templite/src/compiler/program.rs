//! Second compiler pass: emit the render program.
//!
//! The program is a small tree of instructions interpreted at render time.
//! Names are replaced by slot indices, and every name that must come from the
//! render context gets a [`Instruction::Bind`] at the very start of the
//! program, ahead of any control flow.

use std::collections::HashMap;
use std::mem;

use super::blocks::{Analysis, Event};
use crate::parser::Expr;

/// Index of a variable slot in a render frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

impl Slot {
    pub fn index(self) -> usize {
        self.0
    }
}

/// An expression with names resolved to slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Read a slot.
    Load(Slot),
    /// Resolve keys one by one against the value of `base`.
    Dots { base: Box<Operand>, keys: Vec<String> },
    /// Call the function in `filter` with the value of `input`.
    Filter { filter: Slot, input: Box<Operand> },
}

/// One piece of output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Literal(String),
    Value(Operand),
}

/// A render program instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// Copy the slot's name out of the render context into the slot.
    Bind(Slot),
    /// Append one fragment to the output.
    Append(Fragment),
    /// Append several fragments to the output in one step.
    Extend(Vec<Fragment>),
    /// Run `body` if `condition` is truthy.
    If {
        condition: Operand,
        body: Vec<Instruction>,
    },
    /// Run `body` once per element of `iterable`, with the element in `slot`.
    For {
        slot: Slot,
        iterable: Operand,
        body: Vec<Instruction>,
    },
}

/// A compiled render program.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    slots: Vec<String>,
    instructions: Vec<Instruction>,
}

impl Program {
    /// Top-level instructions in execution order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of slots a frame needs.
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The variable name a slot was allocated for.
    pub fn slot_name(&self, slot: Slot) -> &str {
        self.slots.get(slot.index()).map_or("", String::as_str)
    }

    /// Total number of instructions, nested bodies included.
    pub fn len(&self) -> usize {
        count(&self.instructions)
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

fn count(instructions: &[Instruction]) -> usize {
    instructions
        .iter()
        .map(|instruction| match instruction {
            Instruction::If { body, .. } | Instruction::For { body, .. } => 1 + count(body),
            Instruction::Bind(_) | Instruction::Append(_) | Instruction::Extend(_) => 1,
        })
        .sum()
}

/// Emit the program for a validated template.
pub fn emit(analysis: Analysis) -> Program {
    let mut builder = ProgramBuilder::default();

    // Every free name is known now, so the bind prefix can be written first.
    for name in analysis.names.free() {
        let slot = builder.slot(name);
        builder.push(Instruction::Bind(slot));
    }

    for event in analysis.events {
        match event {
            Event::Literal(text) => builder.buffer(Fragment::Literal(text)),
            Event::Print(expr) => {
                let operand = builder.lower(&expr);
                builder.buffer(Fragment::Value(operand));
            }
            Event::OpenIf(condition) => {
                builder.flush();
                let condition = builder.lower(&condition);
                builder.indent(Header::If { condition });
            }
            Event::OpenFor { name, iterable } => {
                builder.flush();
                let slot = builder.slot(&name);
                let iterable = builder.lower(&iterable);
                builder.indent(Header::For { slot, iterable });
            }
            Event::Close => {
                builder.flush();
                builder.dedent();
            }
        }
    }

    builder.flush();
    builder.finish()
}

/// The opening half of a block whose body is still being emitted.
#[derive(Debug)]
enum Header {
    If { condition: Operand },
    For { slot: Slot, iterable: Operand },
}

/// Accumulates instructions, tracking nesting and batching output.
#[derive(Debug)]
struct ProgramBuilder {
    slots: Vec<String>,
    slot_index: HashMap<String, Slot>,
    /// Output fragments not yet emitted.
    buffered: Vec<Fragment>,
    /// Bodies under construction; the root is first, the innermost last.
    bodies: Vec<Vec<Instruction>>,
    headers: Vec<Header>,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            slot_index: HashMap::new(),
            buffered: Vec::new(),
            bodies: vec![Vec::new()],
            headers: Vec::new(),
        }
    }
}

impl ProgramBuilder {
    /// The slot for `name`, allocating one on first use.
    fn slot(&mut self, name: &str) -> Slot {
        if let Some(slot) = self.slot_index.get(name) {
            return *slot;
        }
        let slot = Slot(self.slots.len());
        self.slots.push(name.to_string());
        self.slot_index.insert(name.to_string(), slot);
        slot
    }

    fn lower(&mut self, expr: &Expr) -> Operand {
        match expr {
            Expr::Variable(name) => Operand::Load(self.slot(name)),
            Expr::Dots { base, keys } => Operand::Dots {
                base: Box::new(self.lower(base)),
                keys: keys.clone(),
            },
            Expr::Filter { filter, input } => {
                let input = self.lower(input);
                Operand::Filter {
                    filter: self.slot(filter),
                    input: Box::new(input),
                }
            }
        }
    }

    fn push(&mut self, instruction: Instruction) {
        if let Some(body) = self.bodies.last_mut() {
            body.push(instruction);
        }
    }

    fn buffer(&mut self, fragment: Fragment) {
        self.buffered.push(fragment);
    }

    /// Emit buffered fragments as a single instruction.
    fn flush(&mut self) {
        let instruction = if self.buffered.len() > 1 {
            Instruction::Extend(mem::take(&mut self.buffered))
        } else if let Some(fragment) = self.buffered.pop() {
            Instruction::Append(fragment)
        } else {
            return;
        };
        self.push(instruction);
    }

    fn indent(&mut self, header: Header) {
        self.headers.push(header);
        self.bodies.push(Vec::new());
    }

    fn dedent(&mut self) {
        let Some(header) = self.headers.pop() else {
            return;
        };
        let body = self.bodies.pop().unwrap_or_default();
        let instruction = match header {
            Header::If { condition } => Instruction::If { condition, body },
            Header::For { slot, iterable } => Instruction::For {
                slot,
                iterable,
                body,
            },
        };
        self.push(instruction);
    }

    fn finish(mut self) -> Program {
        while !self.headers.is_empty() {
            self.dedent();
        }
        Program {
            slots: self.slots,
            instructions: self.bodies.pop().unwrap_or_default(),
        }
    }
}
