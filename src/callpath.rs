//! Nesting depth and active function names of the current chain.

use crate::scope::{with_chain, ActiveFrame};

/// Separator between function names in a rendered call path.
pub const PATH_SEPARATOR: &str = " -> ";

/// Handle returned by [`enter`]; pass it back to [`exit`] exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    id: u64,
    /// Function name pushed by this frame.
    pub name: String,
    /// Depth before the push, used for indentation.
    pub depth: usize,
    /// Call path including this frame's name.
    pub path: String,
}

/// Push `name` onto the active chain's call path.
pub fn enter(name: &str) -> Frame {
    with_chain(|chain| {
        let id = chain.next_frame_id;
        chain.next_frame_id += 1;
        let depth = chain.frames.len();
        chain.frames.push(ActiveFrame {
            id,
            name: name.to_string(),
        });
        Frame {
            id,
            name: name.to_string(),
            depth,
            path: join(&chain.frames),
        }
    })
}

/// Pop `frame` from the active chain. In sequential code the frame is
/// always the innermost one; futures interleaved on one task may finish out
/// of order, so the frame is looked up by id. Returns `false` if the frame
/// was not active.
pub fn exit(frame: &Frame) -> bool {
    with_chain(|chain| match chain.frames.iter().rposition(|f| f.id == frame.id) {
        Some(pos) => {
            chain.frames.remove(pos);
            true
        }
        None => false,
    })
}

/// Current nesting depth of the active chain.
pub fn depth() -> usize {
    with_chain(|chain| chain.frames.len())
}

/// Current call path, `" -> "`-joined, empty at top level.
pub fn path() -> String {
    with_chain(|chain| join(&chain.frames))
}

/// Active function names, innermost last.
pub fn names() -> Vec<String> {
    with_chain(|chain| chain.frames.iter().map(|f| f.name.clone()).collect())
}

pub(crate) fn snapshot() -> (usize, String) {
    with_chain(|chain| (chain.frames.len(), join(&chain.frames)))
}

fn join(frames: &[ActiveFrame]) -> String {
    let mut out = String::new();
    for (i, frame) in frames.iter().enumerate() {
        if i > 0 {
            out.push_str(PATH_SEPARATOR);
        }
        out.push_str(&frame.name);
    }
    out
}
