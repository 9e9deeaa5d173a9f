//! The XPointer Framework processor.
//!
//! Parses an expression once into pointer parts, then resolves it against
//! one stream of element events:
//!
//! ```text
//! let mut xp = XPointerProcessor::parse("element(/1/2)")?;
//! for event in events {
//!     let selected = xp.resolve(&event);
//!     ...
//! }
//! xp.ensure_resolved()?;
//! ```
//!
//! While no part has resolved, every part receives every event. The
//! leftmost part that resolves becomes the winner, and from then on only
//! the winner is fed (see [`WinnerPolicy`] for the alternative).

use tracing::{debug, warn};

use crate::config::{ProcessorConfig, WinnerPolicy};
use crate::element::ElementSchemePointer;
use crate::error::{ErrorCode, Result, Warning, XPointerError};
use crate::event::{Attribute, ElementEvent};
use crate::part::{lookup_scheme, FragmentResolver, PointerPart, Scheme};
use crate::scanner::{self, Token};
use crate::shorthand::ShorthandPointer;

/// A parsed XPointer bound to a single traversal.
#[derive(Debug, Clone)]
pub struct XPointerProcessor {
    expression: String,
    parts: Vec<PointerPart>,
    warnings: Vec<Warning>,
    config: ProcessorConfig,
    winner: Option<usize>,
    xpointer_resolved: bool,
}

impl XPointerProcessor {
    /// Parse `expression` with the default configuration.
    pub fn parse(expression: &str) -> Result<Self> {
        Self::with_config(expression, ProcessorConfig::default())
    }

    pub fn with_config(expression: &str, config: ProcessorConfig) -> Result<Self> {
        let error = |code| XPointerError::new(code, expression);

        let mut tokens = scanner::tokenize(expression)?.into_iter();
        let mut parts = Vec::new();
        let mut warnings = Vec::new();
        let mut scheme_based = false;

        while let Some(token) = tokens.next() {
            match token {
                Token::Shorthand(name) => {
                    if scheme_based || !tokens.as_slice().is_empty() {
                        return Err(error(ErrorCode::MultipleShortHandPointers));
                    }
                    parts.push(PointerPart::Shorthand(ShorthandPointer::new_unchecked(name)));
                }
                Token::SchemeName { prefix, local } => {
                    scheme_based = true;
                    let data = match (tokens.next(), tokens.next(), tokens.next()) {
                        (Some(Token::OpenParen), Some(Token::SchemeData(data)), Some(Token::CloseParen)) => data,
                        _ => return Err(error(ErrorCode::InvalidXPointerExpression)),
                    };

                    match lookup_scheme(prefix, local) {
                        Some(Scheme::Element) => {
                            let ptr = ElementSchemePointer::with_capacity(&data, config.initial_depth_capacity)
                                .map_err(|e| error(e.code))?;
                            parts.push(PointerPart::Element(ptr));
                        }
                        _ => {
                            let scheme_name = Token::qualified_name(prefix, local);
                            warn!(scheme = %scheme_name, expression, "unsupported xpointer scheme, skipping pointer part");
                            warnings.push(Warning::UnsupportedScheme {
                                scheme_name,
                                scheme_data: data.into_owned(),
                            });
                        }
                    }
                }
                _ => return Err(error(ErrorCode::InvalidXPointerExpression)),
            }
        }

        debug!(expression, parts = parts.len(), warnings = warnings.len(), "parsed xpointer");

        Ok(Self {
            expression: expression.to_string(),
            parts,
            warnings,
            config,
            winner: None,
            xpointer_resolved: false,
        })
    }

    /// The expression this processor was parsed from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Evaluated pointer parts, in expression order.
    pub fn parts(&self) -> &[PointerPart] {
        &self.parts
    }

    /// Non-fatal problems found while parsing.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// The part currently answering the resolution predicates.
    pub fn winner(&self) -> Option<&PointerPart> {
        self.winner.and_then(|index| self.parts.get(index))
    }

    /// Feed one element event. Returns whether the event resolved.
    pub fn resolve(&mut self, event: &ElementEvent<'_>) -> bool {
        let resolved = match (self.config.winner_policy, self.winner) {
            (WinnerPolicy::FirstMatchWins, Some(index)) => self.parts[index].resolve(event),
            (policy, _) => {
                let mut first = None;
                for (index, part) in self.parts.iter_mut().enumerate() {
                    if part.resolve(event) && first.is_none() {
                        first = Some(index);
                    }
                }

                match policy {
                    WinnerPolicy::FirstMatchWins => {
                        if let Some(index) = first {
                            debug!(
                                expression = %self.expression,
                                part = index,
                                scheme = self.parts[index].scheme_name(),
                                "xpointer part resolved"
                            );
                            self.winner = first;
                        }
                    }
                    WinnerPolicy::ReevaluateAll => self.winner = first,
                }
                first.is_some()
            }
        };

        if resolved {
            self.xpointer_resolved = true;
        }
        resolved
    }

    /// Report an element start tag.
    pub fn start_element(&mut self, name: &str, attributes: &[Attribute<'_>]) -> bool {
        self.resolve(&ElementEvent::Start { name, attributes })
    }

    /// Report an element end tag.
    pub fn end_element(&mut self, name: &str) -> bool {
        self.resolve(&ElementEvent::End { name })
    }

    /// Report an empty-element tag.
    pub fn empty_element(&mut self, name: &str, attributes: &[Attribute<'_>]) -> bool {
        self.resolve(&ElementEvent::Empty { name, attributes })
    }

    /// Is the current node part of the addressed fragment?
    pub fn is_fragment_resolved(&self) -> bool {
        self.winner().is_some_and(|part| part.is_fragment_resolved())
    }

    /// Is the stream inside the content of the addressed element?
    /// Callers use this for character data, comments and the like.
    pub fn is_child_fragment_resolved(&self) -> bool {
        self.winner().is_some_and(|part| part.is_child_fragment_resolved())
    }

    /// True once any event of this traversal has resolved.
    pub fn is_xpointer_resolved(&self) -> bool {
        self.xpointer_resolved
    }

    /// Check, at the end of a traversal, that the pointer resolved.
    pub fn ensure_resolved(&self) -> Result<()> {
        if self.xpointer_resolved {
            Ok(())
        } else {
            Err(XPointerError::new(ErrorCode::ResolutionUnsuccessful, self.expression.as_str()))
        }
    }

    /// Return to the freshly-parsed state for a new traversal.
    pub fn reset(&mut self) {
        for part in &mut self.parts {
            part.reset();
        }
        self.winner = None;
        self.xpointer_resolved = false;
    }
}
