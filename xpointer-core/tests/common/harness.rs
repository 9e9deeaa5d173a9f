//! Test harness: drives an `XPointerProcessor` from XML text
//!
//! quick-xml supplies the element events. Attributes named in
//! [`IdAttributes`] are annotated as DTD or schema identifiers, standing in
//! for a validating parser.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use xpointer_core::{Attribute, ElementEvent, SchemaAnnotation, SimpleType, XPointerProcessor};

use crate::common::TestCase;

/// Which attribute names carry identifier type information
#[derive(Debug, Clone, Default)]
pub struct IdAttributes {
    pub dtd: Vec<String>,
    pub schema: Vec<String>,
}

impl IdAttributes {
    pub fn dtd(names: &[&str]) -> Self {
        Self {
            dtd: names.iter().map(|s| s.to_string()).collect(),
            schema: Vec::new(),
        }
    }

    fn annotate<'a>(&self, name: &'a str, value: &'a str) -> Attribute<'a> {
        if self.schema.iter().any(|n| n == name) {
            Attribute::new(name, value).with_schema(SchemaAnnotation::typed(SimpleType::id()))
        } else if self.dtd.iter().any(|n| n == name) {
            Attribute::dtd_id(name, value)
        } else {
            Attribute::new(name, value)
        }
    }
}

/// One observed node of the traversal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// `<a>`, `</a>`, `<a/>` or `text:...`
    pub label: String,
    /// Event result for elements, child predicate for text
    pub selected: bool,
    pub child_resolved: bool,
}

fn owned_attributes(e: &BytesStart<'_>) -> Vec<(String, String)> {
    e.attributes()
        .map(|attr| {
            let attr = attr.expect("malformed attribute in test XML");
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .expect("bad attribute escape in test XML")
                .into_owned();
            (key, value)
        })
        .collect()
}

fn element_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).into_owned()
}

/// Feed `xml` through `xp`, recording every element and text node.
pub fn trace_xml(xp: &mut XPointerProcessor, xml: &str, ids: &IdAttributes) -> Vec<Step> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut steps = Vec::new();
    loop {
        let (label, selected) = match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = element_name(e.name().as_ref());
                let owned = owned_attributes(&e);
                let attributes: Vec<_> = owned.iter().map(|(k, v)| ids.annotate(k, v)).collect();
                let selected = xp.resolve(&ElementEvent::Start {
                    name: &name,
                    attributes: &attributes,
                });
                (format!("<{}>", name), selected)
            }
            Ok(Event::Empty(e)) => {
                let name = element_name(e.name().as_ref());
                let owned = owned_attributes(&e);
                let attributes: Vec<_> = owned.iter().map(|(k, v)| ids.annotate(k, v)).collect();
                let selected = xp.resolve(&ElementEvent::Empty {
                    name: &name,
                    attributes: &attributes,
                });
                (format!("<{}/>", name), selected)
            }
            Ok(Event::End(e)) => {
                let name = element_name(e.name().as_ref());
                let selected = xp.end_element(&name);
                (format!("</{}>", name), selected)
            }
            Ok(Event::Text(e)) => {
                let text = e.unescape().expect("bad text escape in test XML");
                (format!("text:{}", text), xp.is_child_fragment_resolved())
            }
            Ok(Event::Eof) => break,
            Ok(_) => continue,
            Err(e) => panic!("test XML error at {}: {:?}", reader.buffer_position(), e),
        };

        steps.push(Step {
            label,
            selected,
            child_resolved: xp.is_child_fragment_resolved(),
        });
    }
    steps
}

/// Result of running a fixture case
#[derive(Debug)]
pub struct CaseResult {
    pub passed: bool,
    pub steps: Vec<Step>,
    pub errors: Vec<String>,
}

fn labels(steps: &[Step], pick: impl Fn(&Step) -> bool) -> Vec<String> {
    steps.iter().filter(|s| pick(s)).map(|s| s.label.clone()).collect()
}

/// Run a single fixture case
pub fn run_case(case: &TestCase) -> CaseResult {
    let mut errors = Vec::new();
    let mut steps = Vec::new();

    match (XPointerProcessor::parse(&case.xpointer), &case.error) {
        (Err(err), Some(key)) => {
            if err.code.key() != key {
                errors.push(format!("expected error {}, got {}", key, err.code.key()));
            }
            if err.expression != case.xpointer {
                errors.push(format!("error carries expression {:?}", err.expression));
            }
        }
        (Err(err), None) => errors.push(format!("unexpected parse error: {}", err)),
        (Ok(_), Some(key)) => errors.push(format!("expected error {}, parse succeeded", key)),
        (Ok(mut xp), None) => {
            let warned: Vec<String> = xp
                .warnings()
                .iter()
                .map(|w| match w {
                    xpointer_core::Warning::UnsupportedScheme { scheme_name, .. } => scheme_name.clone(),
                })
                .collect();
            if warned != case.warnings {
                errors.push(format!("warnings: expected {:?}, got {:?}", case.warnings, warned));
            }

            let ids = IdAttributes {
                dtd: case.id_attributes.clone(),
                schema: case.schema_id_attributes.clone(),
            };
            steps = trace_xml(&mut xp, &case.xml, &ids);

            let selected = labels(&steps, |s| s.selected);
            if selected != case.selected {
                errors.push(format!("selected: expected {:?}, got {:?}", case.selected, selected));
            }

            if let Some(expected) = &case.child_resolved {
                let actual = labels(&steps, |s| s.child_resolved);
                if &actual != expected {
                    errors.push(format!("child_resolved: expected {:?}, got {:?}", expected, actual));
                }
            }

            let resolved = xp.ensure_resolved().is_ok();
            let any_selected = steps.iter().any(|s| s.selected && !s.label.starts_with("text:"));
            if resolved != any_selected {
                errors.push(format!("ensure_resolved() = {} but element selection = {}", resolved, any_selected));
            }
        }
    }

    CaseResult {
        passed: errors.is_empty(),
        steps,
        errors,
    }
}

impl CaseResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case: &TestCase) {
        eprintln!("\n=== FAILED: {} ===", case.id);
        eprintln!("{}", case.desc);
        eprintln!("\nXPointer: {}", case.xpointer);
        eprintln!("XML:      {}", case.xml);
        eprintln!("\nTrace:");
        for (i, step) in self.steps.iter().enumerate() {
            eprintln!(
                "  {:>3}: {:<20} selected={:<5} child={}",
                i, step.label, step.selected, step.child_resolved
            );
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
