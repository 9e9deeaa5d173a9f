//! Pointer parts and the scheme registry.
//!
//! A parsed XPointer is an ordered list of [`PointerPart`]s. The set of
//! part kinds is closed: a shorthand name, or an `element()` scheme
//! pointer. Both share the [`FragmentResolver`] contract.

use phf::phf_map;

use crate::element::ElementSchemePointer;
use crate::event::ElementEvent;
use crate::shorthand::ShorthandPointer;

/// Common contract of every pointer part.
pub trait FragmentResolver {
    /// Scheme name (`element`) or, for a shorthand, the name itself.
    fn scheme_name(&self) -> &str;

    /// Raw scheme data; `None` for a shorthand.
    fn scheme_data(&self) -> Option<&str>;

    /// Feed one element event; returns whether it resolved.
    fn resolve(&mut self, event: &ElementEvent<'_>) -> bool;

    /// Is the current node inside (or the start of) the addressed fragment?
    fn is_fragment_resolved(&self) -> bool;

    /// Is the stream currently inside the content of the addressed element?
    fn is_child_fragment_resolved(&self) -> bool;

    /// Forget all traversal state.
    fn reset(&mut self);
}

impl FragmentResolver for ShorthandPointer {
    fn scheme_name(&self) -> &str {
        self.name()
    }

    fn scheme_data(&self) -> Option<&str> {
        None
    }

    fn resolve(&mut self, event: &ElementEvent<'_>) -> bool {
        ShorthandPointer::resolve(self, event)
    }

    fn is_fragment_resolved(&self) -> bool {
        ShorthandPointer::is_fragment_resolved(self)
    }

    fn is_child_fragment_resolved(&self) -> bool {
        ShorthandPointer::is_child_fragment_resolved(self)
    }

    fn reset(&mut self) {
        ShorthandPointer::reset(self)
    }
}

impl FragmentResolver for ElementSchemePointer {
    fn scheme_name(&self) -> &str {
        Self::SCHEME_NAME
    }

    fn scheme_data(&self) -> Option<&str> {
        Some(ElementSchemePointer::scheme_data(self))
    }

    fn resolve(&mut self, event: &ElementEvent<'_>) -> bool {
        ElementSchemePointer::resolve(self, event)
    }

    fn is_fragment_resolved(&self) -> bool {
        ElementSchemePointer::is_fragment_resolved(self)
    }

    fn is_child_fragment_resolved(&self) -> bool {
        ElementSchemePointer::is_child_fragment_resolved(self)
    }

    fn reset(&mut self) {
        ElementSchemePointer::reset(self)
    }
}

/// One pointer part of a parsed XPointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerPart {
    Shorthand(ShorthandPointer),
    Element(ElementSchemePointer),
}

impl PointerPart {
    pub fn as_shorthand(&self) -> Option<&ShorthandPointer> {
        match self {
            PointerPart::Shorthand(ptr) => Some(ptr),
            PointerPart::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementSchemePointer> {
        match self {
            PointerPart::Element(ptr) => Some(ptr),
            PointerPart::Shorthand(_) => None,
        }
    }

    fn resolver(&self) -> &dyn FragmentResolver {
        match self {
            PointerPart::Shorthand(ptr) => ptr,
            PointerPart::Element(ptr) => ptr,
        }
    }

    fn resolver_mut(&mut self) -> &mut dyn FragmentResolver {
        match self {
            PointerPart::Shorthand(ptr) => ptr,
            PointerPart::Element(ptr) => ptr,
        }
    }
}

impl FragmentResolver for PointerPart {
    fn scheme_name(&self) -> &str {
        self.resolver().scheme_name()
    }

    fn scheme_data(&self) -> Option<&str> {
        self.resolver().scheme_data()
    }

    fn resolve(&mut self, event: &ElementEvent<'_>) -> bool {
        self.resolver_mut().resolve(event)
    }

    fn is_fragment_resolved(&self) -> bool {
        self.resolver().is_fragment_resolved()
    }

    fn is_child_fragment_resolved(&self) -> bool {
        self.resolver().is_child_fragment_resolved()
    }

    fn reset(&mut self) {
        self.resolver_mut().reset()
    }
}

impl From<ShorthandPointer> for PointerPart {
    fn from(ptr: ShorthandPointer) -> Self {
        PointerPart::Shorthand(ptr)
    }
}

impl From<ElementSchemePointer> for PointerPart {
    fn from(ptr: ElementSchemePointer) -> Self {
        PointerPart::Element(ptr)
    }
}

/// Schemes registered with the W3C XPointer scheme registry that this
/// engine knows by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Element,
    Xmlns,
    XPointer,
}

impl Scheme {
    /// Only `element()` is evaluated; the others are reported and dropped.
    pub fn is_supported(self) -> bool {
        matches!(self, Scheme::Element)
    }
}

static SCHEMES: phf::Map<&'static str, Scheme> = phf_map! {
    "element" => Scheme::Element,
    "xmlns" => Scheme::Xmlns,
    "xpointer" => Scheme::XPointer,
};

/// Look up a scheme by QName. Prefixed names are never built-in schemes.
pub fn lookup_scheme(prefix: Option<&str>, local: &str) -> Option<Scheme> {
    if prefix.is_some() {
        return None;
    }
    SCHEMES.get(local).copied()
}
