//! Program execution.
//!
//! Walks a compiled [`Program`] against a [`RenderContext`]. Output fragments
//! are appended to a single accumulator in emission order; `if` and `for`
//! instructions recurse into their bodies.

use std::borrow::Cow;

use crate::compiler::{Fragment, Instruction, Operand, Program};
use crate::interpreter::context::RenderContext;
use crate::interpreter::frame::Frame;
use crate::interpreter::resolve::resolve_dots;
use crate::interpreter::RenderError;
use crate::types::Value;

/// Execute a program, producing the rendered text.
///
/// # Errors
///
/// Returns an error if:
/// - A free variable is missing from the context
/// - A loop variable is read before its loop has bound it
/// - A dot chain cannot be resolved
/// - A filter is not callable, or a function fails
/// - A `for` iterable cannot be iterated
pub fn execute(program: &Program, context: RenderContext<'_>) -> Result<String, RenderError> {
    let mut frame = Frame::new(program, context);
    let mut output = String::new();
    run(program.instructions(), &mut frame, &mut output)?;
    Ok(output)
}

fn run(
    instructions: &[Instruction],
    frame: &mut Frame<'_>,
    output: &mut String,
) -> Result<(), RenderError> {
    for instruction in instructions {
        match instruction {
            Instruction::Bind(slot) => frame.bind_from_context(*slot)?,
            Instruction::Append(fragment) => {
                let text = render_fragment(fragment, frame)?;
                output.push_str(&text);
            }
            Instruction::Extend(fragments) => {
                let frame: &Frame<'_> = frame;
                let texts = fragments
                    .iter()
                    .map(|fragment| render_fragment(fragment, frame))
                    .collect::<Result<Vec<_>, _>>()?;
                output.extend(texts);
            }
            Instruction::If { condition, body } => {
                if evaluate(condition, frame)?.is_truthy() {
                    run(body, frame, output)?;
                }
            }
            Instruction::For {
                slot,
                iterable,
                body,
            } => {
                for item in evaluate(iterable, frame)?.iterate()? {
                    frame.set(*slot, item);
                    run(body, frame, output)?;
                }
            }
        }
    }
    Ok(())
}

fn render_fragment<'p>(
    fragment: &'p Fragment,
    frame: &Frame<'_>,
) -> Result<Cow<'p, str>, RenderError> {
    match fragment {
        Fragment::Literal(text) => Ok(Cow::Borrowed(text)),
        Fragment::Value(operand) => Ok(Cow::Owned(evaluate(operand, frame)?.to_string())),
    }
}

/// Evaluate an operand to a value.
pub fn evaluate(operand: &Operand, frame: &Frame<'_>) -> Result<Value, RenderError> {
    match operand {
        Operand::Load(slot) => frame.get(*slot).cloned(),
        Operand::Dots { base, keys } => resolve_dots(evaluate(base, frame)?, keys),
        Operand::Filter { filter, input } => {
            let input = evaluate(input, frame)?;
            match frame.get(*filter)? {
                Value::Function(function) => function.call(&[input]),
                other => Err(RenderError::NotCallable {
                    name: frame.name(*filter).to_string(),
                    type_name: other.type_name().to_string(),
                }),
            }
        }
    }
}
