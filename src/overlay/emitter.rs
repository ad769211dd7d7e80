//! Content-stream operation emitter.

use lopdf::content::Operation;
use lopdf::Object;

use crate::options::RenderMode;
use crate::overlay::geometry::Placement;
use crate::overlay::session::FONT_RESOURCE;

/// Emit one positioned text run.
///
/// Each run is a self-contained operator group: the font and size are set,
/// the graphics state is saved, a text object positions and draws the
/// string with the requested rendering mode, and the state is restored.
pub(crate) fn emit_word(
    ops: &mut Vec<Operation>,
    placement: Placement,
    text: &str,
    mode: RenderMode,
) {
    ops.push(Operation::new(
        "Tf",
        vec![
            FONT_RESOURCE.into(),
            Object::Real(placement.font_size as f32),
        ],
    ));
    ops.push(Operation::new("q", vec![]));
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tr", vec![Object::Integer(mode.operand())]));
    ops.push(Operation::new(
        "Td",
        vec![
            Object::Real(placement.x as f32),
            Object::Real(placement.y as f32),
        ],
    ));
    ops.push(Operation::new("Tj", vec![Object::string_literal(text)]));
    ops.push(Operation::new("ET", vec![]));
    ops.push(Operation::new("Q", vec![]));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mode: RenderMode) -> Vec<Operation> {
        let mut ops = Vec::new();
        let placement = Placement {
            x: 5.0,
            y: 730.0,
            font_size: 19.75,
        };
        emit_word(&mut ops, placement, "Hello", mode);
        ops
    }

    #[test]
    fn test_operator_sequence() {
        let ops = run(RenderMode::Invisible);
        let names: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(names, ["Tf", "q", "BT", "Tr", "Td", "Tj", "ET", "Q"]);
    }

    #[test]
    fn test_render_mode_operand() {
        let invisible = run(RenderMode::Invisible);
        assert_eq!(invisible[3].operands, vec![Object::Integer(3)]);

        let visible = run(RenderMode::Visible);
        assert_eq!(visible[3].operands, vec![Object::Integer(0)]);
    }

    #[test]
    fn test_text_payload() {
        let ops = run(RenderMode::Invisible);
        assert_eq!(ops[5].operands, vec![Object::string_literal("Hello")]);
    }
}
