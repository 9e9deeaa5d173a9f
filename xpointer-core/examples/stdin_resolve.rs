//! Resolve an XPointer against XML read from stdin and print the selection.
//!
//! Usage: cargo run --example stdin_resolve -- 'element(/1/2)' < doc.xml
//!
//! Attributes named `id` or `xml:id` are treated as DTD-declared IDs.

use std::io::Read;

use quick_xml::events::Event;
use quick_xml::Reader;
use xpointer_core::{Attribute, ElementEvent, XPointerProcessor};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let expression = std::env::args().nth(1).ok_or("usage: stdin_resolve <xpointer>")?;
    let mut xp = XPointerProcessor::parse(&expression)?;
    for warning in xp.warnings() {
        eprintln!("warning: {}", warning);
    }

    let mut xml = String::new();
    std::io::stdin().read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut depth = 0usize;
    loop {
        let event = reader.read_event()?;
        let (line, selected) = match &event {
            Event::Start(e) | Event::Empty(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                let mut owned = Vec::new();
                for attr in e.attributes() {
                    let attr = attr?;
                    owned.push((
                        String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                        attr.unescape_value()?.into_owned(),
                    ));
                }
                let attributes: Vec<_> = owned
                    .iter()
                    .map(|(k, v)| match k.as_str() {
                        "id" | "xml:id" => Attribute::dtd_id(k, v),
                        _ => Attribute::new(k, v),
                    })
                    .collect();

                if matches!(event, Event::Start(_)) {
                    let selected = xp.resolve(&ElementEvent::Start { name: &name, attributes: &attributes });
                    let line = format!("{:indent$}<{}>", "", name, indent = depth * 2);
                    depth += 1;
                    (line, selected)
                } else {
                    let selected = xp.resolve(&ElementEvent::Empty { name: &name, attributes: &attributes });
                    (format!("{:indent$}<{}/>", "", name, indent = depth * 2), selected)
                }
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                depth = depth.saturating_sub(1);
                let selected = xp.end_element(&name);
                (format!("{:indent$}</{}>", "", name, indent = depth * 2), selected)
            }
            Event::Text(e) => {
                let text = e.unescape()?;
                (format!("{:indent$}{:?}", "", text, indent = depth * 2), xp.is_child_fragment_resolved())
            }
            Event::Eof => break,
            _ => continue,
        };

        println!("{} {}", if selected { "*" } else { " " }, line);
    }

    xp.ensure_resolved()?;
    Ok(())
}
