//! `element()` scheme pointers.
//!
//! `element(/1/2)` addresses the second child of the first (root) element.
//! `element(intro/3)` addresses the third child of the element whose
//! identifier is `intro`; `element(intro)` is equivalent to the shorthand
//! pointer `intro`.
//!
//! Resolution keeps a stack of 1-based sibling positions for the current
//! path, pushed on element start and popped on element end. A node matches
//! when the child sequence is a prefix of its path, so the matched element
//! and all of its descendants resolve.

use tracing::trace;

use crate::config::{DEFAULT_DEPTH_CAPACITY, MAX_INITIAL_DEPTH_CAPACITY};
use crate::element_scanner::{self, ElementToken};
use crate::error::{ErrorCode, Result, XPointerError};
use crate::event::ElementEvent;
use crate::shorthand::ShorthandPointer;

/// Ordered 1-based child positions. Every step is at least 1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChildSequence(Vec<u32>);

impl ChildSequence {
    /// Build a sequence from raw steps; `None` if any step is zero.
    pub fn new(steps: Vec<u32>) -> Option<Self> {
        steps.iter().all(|&step| step >= 1).then_some(Self(steps))
    }

    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Does this sequence select the node at `path` (or one of its ancestors)?
    fn matches(&self, path: &[u32]) -> bool {
        self.0.len() <= path.len() && self.0.iter().zip(path).all(|(step, pos)| step == pos)
    }
}

/// Per-traversal matching state.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TraversalState {
    /// Sibling position of each open element, outermost first
    positions: Vec<u32>,
    /// Position the next child of the innermost open element will get
    child_position: u32,
    found: bool,
    /// Depth of the matched element (0 = no start-tag match yet)
    found_depth: usize,
    only_empty_element_matched: bool,
}

impl TraversalState {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity.min(MAX_INITIAL_DEPTH_CAPACITY)),
            child_position: 1,
            found: false,
            found_depth: 0,
            only_empty_element_matched: false,
        }
    }

    #[inline]
    fn depth(&self) -> usize {
        self.positions.len()
    }

    fn clear(&mut self) {
        self.positions.clear();
        self.child_position = 1;
        self.found = false;
        self.found_depth = 0;
        self.only_empty_element_matched = false;
    }
}

/// Resolver for an `element()` pointer part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSchemePointer {
    scheme_data: String,
    anchor: Option<ShorthandPointer>,
    child_sequence: ChildSequence,
    state: TraversalState,
    resolved: bool,
}

impl ElementSchemePointer {
    pub const SCHEME_NAME: &'static str = "element";

    /// Parse `element()` scheme data.
    pub fn parse(scheme_data: &str) -> Result<Self> {
        Self::with_capacity(scheme_data, DEFAULT_DEPTH_CAPACITY)
    }

    /// Parse scheme data, pre-sizing the position stack for `depth` levels.
    pub fn with_capacity(scheme_data: &str, depth: usize) -> Result<Self> {
        let mut anchor = None;
        let mut steps = Vec::new();

        for token in element_scanner::tokenize(scheme_data)? {
            match token {
                ElementToken::Name(name) => anchor = Some(ShorthandPointer::new_unchecked(name)),
                ElementToken::ChildStep(step) => steps.push(step),
            }
        }

        let child_sequence = ChildSequence::new(steps).ok_or_else(|| {
            XPointerError::new(ErrorCode::InvalidChildSequenceCharacter, scheme_data)
        })?;

        Ok(Self {
            scheme_data: scheme_data.to_string(),
            anchor,
            child_sequence,
            state: TraversalState::with_capacity(depth),
            resolved: false,
        })
    }

    pub fn scheme_data(&self) -> &str {
        &self.scheme_data
    }

    /// Name of the element the child sequence is relative to, if any.
    pub fn anchor_name(&self) -> Option<&str> {
        self.anchor.as_ref().map(ShorthandPointer::name)
    }

    pub fn child_sequence(&self) -> &ChildSequence {
        &self.child_sequence
    }

    /// Feed one element event. Returns whether the event lies within the
    /// addressed element.
    pub fn resolve(&mut self, event: &ElementEvent<'_>) -> bool {
        // With an anchor, counting only happens inside the anchor element.
        let in_scope = match self.anchor.as_mut() {
            Some(anchor) => anchor.resolve(event),
            None => true,
        };

        self.resolved = if self.child_sequence.is_empty() {
            in_scope
        } else if in_scope {
            self.match_child_sequence(event)
        } else {
            self.state.clear();
            false
        };
        self.resolved
    }

    pub fn is_fragment_resolved(&self) -> bool {
        self.resolved
    }

    pub fn is_child_fragment_resolved(&self) -> bool {
        if self.child_sequence.is_empty() {
            return self
                .anchor
                .as_ref()
                .is_some_and(ShorthandPointer::is_child_fragment_resolved);
        }
        if self.state.only_empty_element_matched {
            // An empty element has no content to be inside of.
            return false;
        }
        self.state.found && self.state.depth() >= self.state.found_depth
    }

    pub fn reset(&mut self) {
        if let Some(anchor) = self.anchor.as_mut() {
            anchor.reset();
        }
        self.state.clear();
        self.resolved = false;
    }

    /// Path compared against the child sequence; the anchor's own frame
    /// is not part of it.
    fn relative<'p>(&self, path: &'p [u32]) -> &'p [u32] {
        let offset = usize::from(self.anchor.is_some());
        path.get(offset..).unwrap_or(&[])
    }

    fn match_child_sequence(&mut self, event: &ElementEvent<'_>) -> bool {
        match event {
            ElementEvent::Start { .. } => {
                let position = self.state.child_position;
                self.state.positions.push(position);
                self.state.child_position = 1;

                let depth = self.state.depth();
                if depth <= self.state.found_depth || self.state.found_depth == 0 {
                    let found = self.child_sequence.matches(self.relative(&self.state.positions));
                    self.state.found = found;
                    self.state.found_depth = if found { depth } else { 0 };
                    self.state.only_empty_element_matched = false;
                }
            }
            ElementEvent::End { .. } => {
                let depth = self.state.depth();
                let found_depth = self.state.found_depth;
                if found_depth == 0 || depth < found_depth {
                    self.state.found = false;
                } else if depth == found_depth {
                    self.state.found = true;
                }

                if let Some(position) = self.state.positions.pop() {
                    self.state.child_position = position.saturating_add(1);
                }
            }
            ElementEvent::Empty { .. } => {
                let position = self.state.child_position;
                self.state.positions.push(position);
                let matched = self.child_sequence.matches(self.relative(&self.state.positions));
                self.state.positions.pop();
                self.state.child_position = position.saturating_add(1);

                self.state.only_empty_element_matched = matched && !self.state.found;
                self.state.found = matched;
            }
        }

        trace!(
            kind = ?event.kind(),
            element = event.name(),
            depth = self.state.depth(),
            found = self.state.found,
            found_depth = self.state.found_depth,
            "element() step"
        );

        self.state.found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Attribute;

    fn start<'a>(name: &'a str, attributes: &'a [Attribute<'a>]) -> ElementEvent<'a> {
        ElementEvent::Start { name, attributes }
    }

    fn empty(name: &str) -> ElementEvent<'_> {
        ElementEvent::Empty { name, attributes: &[] }
    }

    fn end(name: &str) -> ElementEvent<'_> {
        ElementEvent::End { name }
    }

    #[test]
    fn test_parse_sequence() {
        let ptr = ElementSchemePointer::parse("/1/4/2").unwrap();
        assert_eq!(ptr.child_sequence().as_slice(), &[1, 4, 2]);
        assert_eq!(ptr.anchor_name(), None);
        assert_eq!(ptr.scheme_data(), "/1/4/2");
    }

    #[test]
    fn test_parse_anchor() {
        let ptr = ElementSchemePointer::parse("foo/2").unwrap();
        assert_eq!(ptr.anchor_name(), Some("foo"));
        assert_eq!(ptr.child_sequence().as_slice(), &[2]);

        let ptr = ElementSchemePointer::parse("foo").unwrap();
        assert!(ptr.child_sequence().is_empty());
    }

    #[test]
    fn test_parse_zero_fails() {
        let err = ElementSchemePointer::parse("/0").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidChildSequenceCharacter);
        assert_eq!(err.expression, "/0");
    }

    #[test]
    fn test_child_sequence_rejects_zero() {
        assert!(ChildSequence::new(vec![1, 0]).is_none());
        assert!(ChildSequence::new(vec![]).is_some());
    }

    #[test]
    fn test_second_child_of_root() {
        // <a><b/><c/></a>
        let mut ptr = ElementSchemePointer::parse("/1/1").unwrap();
        assert!(!ptr.resolve(&start("a", &[])));
        assert!(ptr.resolve(&empty("b")));
        assert!(!ptr.is_child_fragment_resolved());
        assert!(!ptr.resolve(&empty("c")));
        assert!(!ptr.resolve(&end("a")));
    }

    #[test]
    fn test_match_spans_subtree() {
        // <r><x/><y><z/></y><w/></r>, element(/1/2) is <y>
        let mut ptr = ElementSchemePointer::parse("/1/2").unwrap();
        assert!(!ptr.resolve(&start("r", &[])));
        assert!(!ptr.resolve(&empty("x")));

        assert!(ptr.resolve(&start("y", &[])));
        assert!(ptr.is_child_fragment_resolved());

        assert!(ptr.resolve(&empty("z")));
        assert!(ptr.is_child_fragment_resolved());

        assert!(ptr.resolve(&end("y")));
        assert!(!ptr.is_child_fragment_resolved());

        assert!(!ptr.resolve(&empty("w")));
        assert!(!ptr.resolve(&end("r")));
    }

    #[test]
    fn test_match_closed_by_parent_end() {
        // <r><s><t></t></s></r>, element(/1/1/1) is <t>
        let mut ptr = ElementSchemePointer::parse("/1/1/1").unwrap();
        assert!(!ptr.resolve(&start("r", &[])));
        assert!(!ptr.resolve(&start("s", &[])));
        assert!(ptr.resolve(&start("t", &[])));
        assert!(ptr.resolve(&end("t")));
        assert!(!ptr.resolve(&end("s")));
        assert!(!ptr.is_fragment_resolved());
        assert!(!ptr.resolve(&end("r")));
    }

    #[test]
    fn test_sibling_numbering_continues_after_subtree() {
        // <r><a><x/><x/></a><b/><c/></r>, element(/1/3) is <c>
        let mut ptr = ElementSchemePointer::parse("/1/3").unwrap();
        assert!(!ptr.resolve(&start("r", &[])));
        assert!(!ptr.resolve(&start("a", &[])));
        assert!(!ptr.resolve(&empty("x")));
        assert!(!ptr.resolve(&empty("x")));
        assert!(!ptr.resolve(&end("a")));
        assert!(!ptr.resolve(&empty("b")));
        assert!(ptr.resolve(&empty("c")));
        assert!(!ptr.resolve(&end("r")));
    }

    #[test]
    fn test_sequence_longer_than_document() {
        let mut ptr = ElementSchemePointer::parse("/1/1/1").unwrap();
        assert!(!ptr.resolve(&start("r", &[])));
        assert!(!ptr.resolve(&empty("a")));
        assert!(!ptr.resolve(&end("r")));
    }

    #[test]
    fn test_anchor_relative() {
        // <doc><foo id="foo"><a/><c/></foo><x/></doc>, element(foo/2) is <c>
        let anchor = [Attribute::dtd_id("id", "foo")];
        let mut ptr = ElementSchemePointer::parse("foo/2").unwrap();
        assert!(!ptr.resolve(&start("doc", &[])));
        assert!(!ptr.resolve(&start("foo", &anchor)));
        assert!(!ptr.resolve(&empty("a")));
        assert!(ptr.resolve(&empty("c")));
        assert!(!ptr.is_child_fragment_resolved());
        assert!(!ptr.resolve(&end("foo")));
        assert!(!ptr.resolve(&empty("x")));
        assert!(!ptr.resolve(&end("doc")));
    }

    #[test]
    fn test_anchor_descendants() {
        // <foo id="foo"><a/><b><i/></b></foo>, element(foo/2) is <b>
        let anchor = [Attribute::dtd_id("id", "foo")];
        let mut ptr = ElementSchemePointer::parse("foo/2").unwrap();
        assert!(!ptr.resolve(&start("foo", &anchor)));
        assert!(!ptr.resolve(&empty("a")));
        assert!(ptr.resolve(&start("b", &[])));
        assert!(ptr.resolve(&empty("i")));
        assert!(ptr.resolve(&end("b")));
        assert!(!ptr.resolve(&end("foo")));
    }

    #[test]
    fn test_anchor_only() {
        let anchor = [Attribute::dtd_id("id", "foo")];
        let mut ptr = ElementSchemePointer::parse("foo").unwrap();
        assert!(!ptr.resolve(&start("doc", &[])));
        assert!(ptr.resolve(&start("foo", &anchor)));
        assert!(ptr.is_child_fragment_resolved());
        assert!(ptr.resolve(&end("foo")));
        assert!(!ptr.is_child_fragment_resolved());
        assert!(!ptr.resolve(&end("doc")));
    }

    #[test]
    fn test_deep_nesting_grows_stack() {
        let mut ptr = ElementSchemePointer::with_capacity("/1/1/1/1/1/1/1/1/1/1", 2).unwrap();
        for depth in 1..10 {
            assert!(!ptr.resolve(&start("n", &[])), "depth {}", depth);
        }
        assert!(ptr.resolve(&start("n", &[])));
        assert!(ptr.resolve(&start("deeper", &[])));
    }

    #[test]
    fn test_huge_capacity_request() {
        let mut ptr = ElementSchemePointer::with_capacity("/1", usize::MAX).unwrap();
        assert!(ptr.resolve(&start("r", &[])));
    }

    #[test]
    fn test_sibling_counter_saturates() {
        let mut ptr = ElementSchemePointer::parse("/1/2").unwrap();
        assert!(!ptr.resolve(&start("r", &[])));
        ptr.state.child_position = u32::MAX;

        assert!(!ptr.resolve(&empty("a")));
        assert_eq!(ptr.state.child_position, u32::MAX);

        assert!(!ptr.resolve(&start("b", &[])));
        assert!(!ptr.resolve(&end("b")));
        assert_eq!(ptr.state.child_position, u32::MAX);
        assert!(!ptr.resolve(&end("r")));
    }

    #[test]
    fn test_reset() {
        let mut ptr = ElementSchemePointer::parse("/1").unwrap();
        assert!(ptr.resolve(&start("r", &[])));
        ptr.reset();
        assert!(!ptr.is_fragment_resolved());
        assert!(ptr.resolve(&empty("r")));
    }
}
