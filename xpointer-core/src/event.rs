//! Element events - the input consumed by the XPointer resolvers.
//!
//! This is a SAX-style event model: the document pipeline reports each
//! element as it is encountered, with no accumulation. Structure is
//! represented by start/end event pairs, or a single empty-element event.
//!
//! Character data, comments and processing instructions are never fed to
//! the resolvers; callers decide about them by querying
//! `is_child_fragment_resolved()` at that point in the stream.
//!
//! ## Event Sequences
//!
//! `<a id="x"><b/><c>text</c></a>` is reported as:
//! ```text
//! Start { name: "a", attributes: [id="x"] }
//! Empty { name: "b", attributes: [] }
//! Start { name: "c", attributes: [] }
//! End   { name: "c" }
//! End   { name: "a" }
//! ```

/// Which structural event a resolver is seeing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    End,
    Empty,
}

/// Element structural events.
///
/// The lifetime `'a` refers to the caller's buffers - names and
/// attributes are borrowed for the duration of a single call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementEvent<'a> {
    /// Element start tag: `<name ...>`
    Start {
        name: &'a str,
        attributes: &'a [Attribute<'a>],
    },

    /// Element end tag: `</name>`
    End { name: &'a str },

    /// Empty-element tag: `<name .../>`
    Empty {
        name: &'a str,
        attributes: &'a [Attribute<'a>],
    },
}

impl<'a> ElementEvent<'a> {
    pub fn kind(&self) -> EventKind {
        match self {
            ElementEvent::Start { .. } => EventKind::Start,
            ElementEvent::End { .. } => EventKind::End,
            ElementEvent::Empty { .. } => EventKind::Empty,
        }
    }

    /// Element name (as reported by the pipeline, prefix included).
    pub fn name(&self) -> &'a str {
        match *self {
            ElementEvent::Start { name, .. }
            | ElementEvent::End { name }
            | ElementEvent::Empty { name, .. } => name,
        }
    }

    /// Attributes of the element. End events have none.
    pub fn attributes(&self) -> &'a [Attribute<'a>] {
        match *self {
            ElementEvent::Start { attributes, .. } | ElementEvent::Empty { attributes, .. } => {
                attributes
            }
            ElementEvent::End { .. } => &[],
        }
    }
}

/// Declared type name that marks a DTD identifier attribute.
pub const DTD_ID_TYPE: &str = "ID";

/// Declared type reported for attributes with no declaration.
pub const DTD_CDATA_TYPE: &str = "CDATA";

/// An attribute as reported by the document pipeline.
///
/// `declared_type` is the DTD attribute type (`"CDATA"` when undeclared).
/// `schema` holds the post-schema-validation annotation, when the
/// pipeline validated against a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub declared_type: &'a str,
    pub schema: Option<SchemaAnnotation<'a>>,
}

impl<'a> Attribute<'a> {
    /// Undeclared (CDATA) attribute.
    pub fn new(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            value,
            declared_type: DTD_CDATA_TYPE,
            schema: None,
        }
    }

    /// Attribute declared with type `ID` in the DTD.
    pub fn dtd_id(name: &'a str, value: &'a str) -> Self {
        Self::new(name, value).with_declared_type(DTD_ID_TYPE)
    }

    pub fn with_declared_type(mut self, declared_type: &'a str) -> Self {
        self.declared_type = declared_type;
        self
    }

    pub fn with_schema(mut self, schema: SchemaAnnotation<'a>) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Value of this attribute if the DTD declares it as an `ID`.
    pub fn dtd_determined_id(&self) -> Option<&'a str> {
        (self.declared_type == DTD_ID_TYPE).then_some(self.value)
    }

    /// Value of this attribute if schema validation typed it as an ID.
    ///
    /// The member type definition (for union types) wins over the declared
    /// type definition. The schema-normalized value is preferred over the
    /// lexical value.
    pub fn schema_determined_id(&self) -> Option<&'a str> {
        let schema = self.schema.as_ref()?;
        let type_definition = schema.member_type.or(schema.type_definition)?;
        if !type_definition.is_id_type() {
            return None;
        }
        Some(schema.normalized_value.unwrap_or(self.value))
    }
}

/// Post-schema-validation information attached to an attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaAnnotation<'a> {
    /// Actual member type when the declared type is a union
    pub member_type: Option<SimpleType<'a>>,
    /// Declared simple type of the attribute
    pub type_definition: Option<SimpleType<'a>>,
    /// Schema-normalized value
    pub normalized_value: Option<&'a str>,
}

impl<'a> SchemaAnnotation<'a> {
    /// Annotation for an attribute whose declared type is `ty`.
    pub fn typed(ty: SimpleType<'a>) -> Self {
        Self {
            type_definition: Some(ty),
            ..Self::default()
        }
    }

    pub fn with_member_type(mut self, ty: SimpleType<'a>) -> Self {
        self.member_type = Some(ty);
        self
    }

    pub fn with_normalized_value(mut self, value: &'a str) -> Self {
        self.normalized_value = Some(value);
        self
    }
}

/// A schema simple type definition, reduced to what ID detection needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleType<'a> {
    pub name: &'a str,
    /// True when the type is derived (by restriction) from `xs:ID`
    pub derived_from_id: bool,
}

impl<'a> SimpleType<'a> {
    pub fn named(name: &'a str) -> Self {
        Self {
            name,
            derived_from_id: false,
        }
    }

    /// The built-in `ID` type.
    pub fn id() -> Self {
        Self::named(DTD_ID_TYPE)
    }

    /// A user type derived from `ID`.
    pub fn derived_from_id(name: &'a str) -> Self {
        Self {
            name,
            derived_from_id: true,
        }
    }

    pub fn is_id_type(&self) -> bool {
        self.derived_from_id || self.name == DTD_ID_TYPE
    }
}
