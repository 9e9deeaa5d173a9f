//! XPointer Core
//!
//! Streaming resolution of XPointer fragment identifiers. An expression is
//! parsed once, then fed the element events of a single document traversal;
//! each event reports whether it lies inside the addressed fragment. No tree
//! is ever built.
//!
//! Supported: shorthand pointers (`intro`) and the `element()` scheme
//! (`element(/1/2)`, `element(intro/3)`). Other schemes are parsed, reported
//! as warnings and skipped.
//!
//! # Architecture
//!
//! - **chars.rs** - Character classes and NCName scanning
//! - **scanner.rs** - Framework tokenizer (shorthand / scheme parts)
//! - **element_scanner.rs** - `element()` scheme data tokenizer
//! - **event.rs** - Element events and attribute type information
//! - **shorthand.rs** - Shorthand pointer resolution
//! - **element.rs** - Child sequence resolution
//! - **part.rs** - Pointer parts and the scheme registry
//! - **processor.rs** - Multi-part coordination
//! - **config.rs** / **error.rs** - Configuration, error codes
//!
//! ```text
//! let mut xp = XPointerProcessor::parse("element(/1/2)")?;
//! xp.start_element("doc", &[]);      // false
//! xp.empty_element("a", &[]);        // false
//! xp.empty_element("b", &[]);        // true
//! xp.end_element("doc");             // false
//! xp.ensure_resolved()?;
//! ```

pub mod chars;
pub mod config;
pub mod element;
pub mod element_scanner;
pub mod error;
pub mod event;
pub mod part;
pub mod processor;
pub mod scanner;
pub mod shorthand;

pub use config::{ProcessorConfig, WinnerPolicy};
pub use element::{ChildSequence, ElementSchemePointer};
pub use element_scanner::ElementToken;
pub use error::{ErrorCode, Result, Warning, XPointerError};
pub use event::{Attribute, ElementEvent, EventKind, SchemaAnnotation, SimpleType};
pub use part::{FragmentResolver, PointerPart, Scheme};
pub use processor::XPointerProcessor;
pub use scanner::Token;
pub use shorthand::ShorthandPointer;
