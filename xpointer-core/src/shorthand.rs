//! Shorthand pointers: a bare NCName that addresses the element carrying
//! a matching identifier attribute.
//!
//! An element's identifier is found by walking its attributes in order
//! and, for each attribute, trying:
//!
//! 1. a schema-determined ID (the attribute's schema type is `ID`),
//! 2. a schema-determined ID on a child element (never matches, see
//!    [`child_schema_determined_id`]),
//! 3. a DTD-determined ID (declared attribute type `ID`).
//!
//! The first identifier found is compared with the pointer's name.

use crate::chars::is_ncname;
use crate::error::{ErrorCode, Result, XPointerError};
use crate::event::{Attribute, ElementEvent};

/// Resolver for a shorthand pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShorthandPointer {
    name: String,
    matched: bool,
    /// Open elements inside (and including) the matched element
    nested_match_count: u32,
}

impl ShorthandPointer {
    /// Create a resolver for `name`, which must be an NCName.
    pub fn parse(name: &str) -> Result<Self> {
        if !is_ncname(name) {
            return Err(XPointerError::new(ErrorCode::InvalidShortHandPointer, name));
        }
        Ok(Self::new_unchecked(name))
    }

    pub(crate) fn new_unchecked(name: &str) -> Self {
        Self {
            name: name.to_string(),
            matched: false,
            nested_match_count: 0,
        }
    }

    /// The identifier this pointer looks for.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Feed one element event. Returns whether the event lies within
    /// the addressed element.
    pub fn resolve(&mut self, event: &ElementEvent<'_>) -> bool {
        // A match whose element has closed no longer applies.
        if self.nested_match_count == 0 {
            self.matched = false;
        }

        match event {
            ElementEvent::Start { attributes, .. } => {
                if self.nested_match_count == 0 {
                    self.matched = self.has_matching_identifier(attributes);
                }
                if self.matched {
                    self.nested_match_count += 1;
                }
            }
            ElementEvent::Empty { attributes, .. } => {
                if self.nested_match_count == 0 {
                    self.matched = self.has_matching_identifier(attributes);
                }
            }
            ElementEvent::End { .. } => {
                if self.matched {
                    self.nested_match_count = self.nested_match_count.saturating_sub(1);
                }
            }
        }

        self.matched
    }

    pub fn is_fragment_resolved(&self) -> bool {
        self.matched
    }

    /// True while the stream is inside the content of the matched element.
    ///
    /// This holds from the matched element's start tag onward, so content
    /// that follows it is included. It turns false at the matched element's
    /// own end tag, which is still fragment-resolved.
    pub fn is_child_fragment_resolved(&self) -> bool {
        self.matched && self.nested_match_count > 0
    }

    pub fn reset(&mut self) {
        self.matched = false;
        self.nested_match_count = 0;
    }

    fn has_matching_identifier(&self, attributes: &[Attribute<'_>]) -> bool {
        identifier(attributes) == Some(self.name.as_str())
    }
}

/// The identifier of an element with the given attributes, if it has one.
pub fn identifier<'a>(attributes: &[Attribute<'a>]) -> Option<&'a str> {
    attributes.iter().find_map(|attr| {
        attr.schema_determined_id()
            .or_else(|| child_schema_determined_id(attr))
            .or_else(|| attr.dtd_determined_id())
    })
}

/// Identifier determined by a schema constraint on the element's children.
///
/// XPointer Framework §3.2 allows an element to be identified through a
/// schema-typed ID on a child element. That lookup needs the children,
/// which a streaming resolver has not seen yet at the start tag, so it
/// never reports an identifier.
fn child_schema_determined_id<'a>(_attr: &Attribute<'a>) -> Option<&'a str> {
    None
}
