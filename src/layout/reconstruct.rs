use std::io;

use crate::config::Options;
use crate::core::model::TextObservation;
use crate::export::{BufferedSink, TextSink};

/// Result of reconstructing one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconstruction {
    /// The page had no usable fragments; nothing was emitted.
    EmptyInput,
    Emitted { fragments: usize },
}

/// Per-page indentation tracking. Never outlives or crosses a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LayoutState {
    indent_level: usize,
    prev_start: i64,
    prev_end: i64,
}

impl LayoutState {
    fn starting_at(first: &TextObservation) -> Self {
        Self {
            indent_level: 0,
            prev_start: first.start(),
            prev_end: first.end(),
        }
    }
}

/// Rebuilds line breaks, paragraph breaks and indentation for one page,
/// emitting each fragment's text to `sink` as soon as it is placed.
///
/// Fragments are taken in the order given. Blank fragments are skipped
/// without touching the layout state.
pub fn reconstruct_into<S: TextSink + ?Sized>(
    observations: &[TextObservation],
    options: &Options,
    sink: &mut S,
) -> io::Result<Reconstruction> {
    let mut readable = observations.iter().filter(|obs| !obs.is_blank());

    let Some(first) = readable.next() else {
        return Ok(Reconstruction::EmptyInput);
    };

    let mut state = LayoutState::starting_at(first);
    sink.emit(&first.text)?;
    sink.emit(" ")?;
    let mut fragments = 1;

    for obs in readable {
        let chunk = place_fragment(&mut state, obs, options);
        sink.emit(&chunk)?;
        fragments += 1;
    }

    Ok(Reconstruction::Emitted { fragments })
}

/// Buffered convenience over [`reconstruct_into`]; `None` means no text.
pub fn reconstruct(observations: &[TextObservation], options: &Options) -> Option<String> {
    let mut sink = BufferedSink::new();
    match reconstruct_into(observations, options, &mut sink) {
        Ok(Reconstruction::Emitted { .. }) => Some(sink.into_text()),
        Ok(Reconstruction::EmptyInput) | Err(_) => None,
    }
}

fn place_fragment(state: &mut LayoutState, obs: &TextObservation, options: &Options) -> String {
    let start = obs.start();
    let end = obs.end();
    let mut out = String::with_capacity(obs.text.len() + 8);

    // Shifted right but ending short of the line above: a new block.
    if start > state.prev_start && end < state.prev_end {
        out.push('\n');
    }

    if start > state.prev_start {
        state.indent_level += 1;
        out.push('\n');
    } else if start < state.prev_start && state.indent_level > 1 {
        state.indent_level -= 1;
        out.push('\n');
    }

    // prev_start only follows rightward or equal moves.
    if start >= state.prev_start {
        if options.indent_enabled && state.indent_level > 0 {
            out.push_str(&options.indent_unit.as_str().repeat(state.indent_level));
        }
        state.prev_start = start;
    }

    out.push_str(&obs.text);
    out.push(' ');

    // Shorter than the line above: treat as a wrapped line boundary.
    if end < state.prev_end {
        out.push('\n');
    }
    state.prev_end = end;

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndentUnit;
    use crate::core::geometry::BBox;
    use pretty_assertions::assert_eq;

    /// Fragment whose baseline spans grid columns `start..end`.
    fn frag(text: &str, start: i64, end: i64) -> TextObservation {
        let x0 = start as f64 / 10.0;
        let x1 = end as f64 / 10.0;
        TextObservation::new(text, BBox::new(x0, 0.0, x1, 0.05).to_quad())
    }

    fn layout(frags: &[TextObservation]) -> String {
        reconstruct(frags, &Options::default()).unwrap()
    }

    #[test]
    fn single_fragment_is_emitted_verbatim() {
        assert_eq!(layout(&[frag("Hello", 3, 7)]), "Hello ");
    }

    #[test]
    fn equal_starts_continue_the_line() {
        let out = layout(&[frag("Title", 1, 5), frag("Body", 1, 9)]);
        assert_eq!(out, "Title Body ");
    }

    #[test]
    fn rightward_move_indents_once() {
        let out = layout(&[frag("Intro", 1, 8), frag("Nested", 2, 9)]);
        assert_eq!(out, "Intro \n    Nested ");
    }

    #[test]
    fn tab_indent_unit() {
        let options = Options {
            indent_unit: IndentUnit::Tab,
            ..Options::default()
        };
        let out = reconstruct(&[frag("Intro", 1, 8), frag("Nested", 2, 9)], &options).unwrap();
        assert_eq!(out, "Intro \n\tNested ");
    }

    #[test]
    fn shifted_and_shorter_line_starts_a_block() {
        let out = layout(&[frag("Heading line", 1, 9), frag("Quote", 3, 6)]);
        assert_eq!(out, "Heading line \n\n    Quote \n");
    }

    #[test]
    fn shorter_line_ends_with_newline() {
        let out = layout(&[frag("Long line", 1, 9), frag("Short", 1, 4)]);
        assert_eq!(out, "Long line Short \n");
    }

    #[test]
    fn indent_never_drops_below_one_on_leftward_moves() {
        let frags = [
            frag("a", 1, 9),
            frag("b", 2, 9),
            frag("c", 3, 9),
            frag("d", 1, 9),
            frag("e", 0, 9),
            frag("f", 0, 9),
        ];
        let out = layout(&frags);
        // a; b at level 1; c at level 2; d drops to 1; e stays at 1 and
        // joins d's line without updating the tracked start.
        assert_eq!(out, "a \n    b \n        c \nd e f ");
    }

    #[test]
    fn leftward_move_after_single_indent_keeps_the_line() {
        let out = layout(&[frag("a", 1, 9), frag("b", 3, 9), frag("c", 1, 9)]);
        assert_eq!(out, "a \n    b c ");
    }

    #[test]
    fn equal_start_after_indent_repeats_the_indent() {
        let out = layout(&[frag("a", 1, 9), frag("b", 2, 9), frag("c", 2, 9)]);
        assert_eq!(out, "a \n    b     c ");
    }

    #[test]
    fn disabled_indentation_emits_no_indent_units() {
        let options = Options {
            indent_enabled: false,
            ..Options::default()
        };
        let frags = [
            frag("a", 1, 9),
            frag("b", 2, 9),
            frag("c", 3, 9),
            frag("d", 4, 9),
        ];
        let out = reconstruct(&frags, &options).unwrap();
        assert_eq!(out, "a \nb \nc \nd ");
        assert!(!out.contains("    "));
    }

    #[test]
    fn blank_fragments_do_not_change_output() {
        let clean = [frag("Intro", 1, 8), frag("Nested", 2, 9), frag("Tail", 2, 5)];
        let noisy = [
            frag("", 0, 0),
            frag("Intro", 1, 8),
            frag("   ", 9, 9),
            frag("Nested", 2, 9),
            frag("\t", 0, 1),
            frag("Tail", 2, 5),
        ];
        assert_eq!(layout(&noisy), layout(&clean));
    }

    #[test]
    fn empty_page_signals_empty_input() {
        let mut sink = BufferedSink::new();
        let outcome = reconstruct_into(&[], &Options::default(), &mut sink).unwrap();
        assert_eq!(outcome, Reconstruction::EmptyInput);
        assert_eq!(sink.as_str(), "");
        assert_eq!(reconstruct(&[frag(" ", 1, 2)], &Options::default()), None);
    }

    #[test]
    fn reports_fragment_count() {
        let mut sink = BufferedSink::new();
        let outcome = reconstruct_into(
            &[frag("a", 1, 9), frag("b", 1, 9)],
            &Options::default(),
            &mut sink,
        )
        .unwrap();
        assert_eq!(outcome, Reconstruction::Emitted { fragments: 2 });
    }
}
