//! Textual disambiguation rules
//!
//! Some distinctions are not carried by the parse tree's structure and are
//! read from a production's source text instead. Every predicate here takes
//! compact text (whitespace removed, see [`og_syntax::compact`]).

use og_ast::ChannelDirection;

/// Pointer-indirection marker of receivers and embedded fields
pub const POINTER_MARKER: char = '*';

/// Wildcard spelling of a default case
pub const WILDCARD: &str = "_";

/// Alias text meaning "merge into the current namespace"
pub const MERGE_MARKERS: [char; 2] = ['.', ':'];

/// Whether a receiver, embedded field or receiver type is a pointer
pub fn has_pointer_marker(text: &str) -> bool {
    text.contains(POINTER_MARKER)
}

/// Whether an inc/dec statement increments
pub fn is_increment(text: &str) -> bool {
    text.contains("++")
}

/// Operator of an assignment
///
/// A one-character operator can only be plain assignment and is normalized
/// to `=`; compound operators are kept as written.
pub fn normalize_assign_op(text: &str) -> String {
    if text.chars().count() == 1 {
        "=".to_string()
    } else {
        text.to_string()
    }
}

/// Whether an import spec without alias identifier merges the package
/// namespace
///
/// `text` is the spec's text outside its path.
pub fn has_merge_marker(text: &str) -> bool {
    text.contains(MERGE_MARKERS)
}

/// Whether a switch or comm case is the default case
pub fn is_wildcard_case(text: &str) -> bool {
    text == WILDCARD
}

/// How the sub-expressions of a slice production map to its bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceShape {
    /// `[low:high:max]` rather than `[low:high]`
    pub three_bound: bool,
    /// Whether the first sub-expression is the low bound
    pub has_low: bool,
}

/// Reads the bound layout of a slice from its text
///
/// The text is split on `:`. Two segments make a two-bound slice, three a
/// three-bound one. A first segment of at most one character (just the
/// opening bracket) means the low bound was omitted. Any other segment count
/// is unrecognized and yields `None`.
pub fn slice_shape(text: &str) -> Option<SliceShape> {
    let segments: Vec<&str> = text.split(':').collect();
    let three_bound = match segments.len() {
        2 => false,
        3 => true,
        _ => return None,
    };
    Some(SliceShape {
        three_bound,
        has_low: segments[0].chars().count() > 1,
    })
}

/// Direction of a channel type from its `chan` declaration text
pub fn channel_direction(text: &str) -> Option<ChannelDirection> {
    match text {
        "chan" => Some(ChannelDirection::Both),
        "chan<-" => Some(ChannelDirection::Send),
        "<-chan" => Some(ChannelDirection::Recv),
        _ => None,
    }
}

/// Whether a statement terminator ends a counted line
pub fn is_counted_terminator(text: &str, at_end_of_input: bool) -> bool {
    at_end_of_input || text == ";"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_marker() {
        assert!(has_pointer_marker("(*Foo)"));
        assert!(has_pointer_marker("*Foo::bar"));
        assert!(!has_pointer_marker("Foo::bar"));
    }

    #[test]
    fn increment_marker() {
        assert!(is_increment("i++"));
        assert!(!is_increment("i--"));
        assert!(!is_increment("i+"));
    }

    #[test]
    fn assignment_operator() {
        assert_eq!(normalize_assign_op("="), "=");
        assert_eq!(normalize_assign_op("+="), "+=");
        assert_eq!(normalize_assign_op("<<="), "<<=");
    }

    #[test]
    fn merge_marker() {
        assert!(has_merge_marker("."));
        assert!(has_merge_marker(":"));
        assert!(!has_merge_marker(""));
        assert!(!has_merge_marker("z"));
    }

    #[test]
    fn wildcard_case() {
        assert!(is_wildcard_case("_"));
        assert!(!is_wildcard_case("__"));
        assert!(!is_wildcard_case("_x"));
    }

    #[test]
    fn slice_shapes() {
        let shape = |text| slice_shape(text).map(|shape| (shape.three_bound, shape.has_low));
        assert_eq!(shape("[:n]"), Some((false, false)));
        assert_eq!(shape("[n:]"), Some((false, true)));
        assert_eq!(shape("[n:m]"), Some((false, true)));
        assert_eq!(shape("[n:m:k]"), Some((true, true)));
        assert_eq!(shape("[:m:k]"), Some((true, false)));
        assert_eq!(shape("[n]"), None);
        assert_eq!(shape("[a:b:c:d]"), None);
    }

    #[test]
    fn channel_directions() {
        assert_eq!(channel_direction("chan"), Some(ChannelDirection::Both));
        assert_eq!(channel_direction("chan<-"), Some(ChannelDirection::Send));
        assert_eq!(channel_direction("<-chan"), Some(ChannelDirection::Recv));
        assert_eq!(channel_direction("<-"), None);
    }

    #[test]
    fn counted_terminators() {
        assert!(is_counted_terminator(";", false));
        assert!(is_counted_terminator("", true));
        assert!(!is_counted_terminator("", false));
    }
}
