//! XML parsing into the owned [`Element`] tree

use std::fs;
use std::path::Path;

use crate::element::Element;
use crate::error::{Error, Result};

const INLINE_ORIGIN: &str = "<markup text>";

/// Parse markup text into its root element.
///
/// Empty or whitespace-only input is valid and yields `Ok(None)`. Anything
/// else must be a well-formed XML document.
pub fn parse(text: &str) -> Result<Option<Element>> {
    parse_with_origin(text, INLINE_ORIGIN)
}

/// Read a markup file and parse it into its root element.
pub fn load(path: impl AsRef<Path>) -> Result<Option<Element>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    tracing::debug!(?path, bytes = content.len(), "Loaded markup file");
    parse_with_origin(&content, &path.display().to_string())
}

fn parse_with_origin(text: &str, origin: &str) -> Result<Option<Element>> {
    // Some editors prepend a BOM, which the XML parser rejects
    let text = text.trim_start_matches('\u{feff}');
    if text.trim().is_empty() {
        tracing::debug!(origin, "Markup is empty");
        return Ok(None);
    }

    let doc = roxmltree::Document::parse(text).map_err(|e| Error::parse(origin, e.to_string()))?;
    Ok(element_from_node(doc.root_element()))
}

fn element_from_node(node: roxmltree::Node<'_, '_>) -> Option<Element> {
    if !node.is_element() {
        return None;
    }

    let attributes = node
        .attributes()
        .map(|a| (a.name().to_string(), a.value().to_string()))
        .collect();

    let mut text = String::new();
    for child in node.children().filter(|c| c.is_text()) {
        if let Some(t) = child.text() {
            text.push_str(t);
        }
    }

    let children: Vec<Element> = node.children().filter_map(element_from_node).collect();
    let indentation = !children.is_empty() && text.trim().is_empty();

    Some(Element {
        name: node.tag_name().name().to_string(),
        attributes,
        text: (!text.is_empty() && !indentation).then_some(text),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_empty_text_yields_none() {
        assert!(parse("").unwrap().is_none());
        assert!(parse("   \n\t").unwrap().is_none());
    }

    #[test]
    fn parse_keeps_attribute_and_child_order() {
        let root = parse(r#"<Structure a="1" b="2"><X/><Y/><X/></Structure>"#)
            .unwrap()
            .unwrap();

        assert_eq!(root.name, "Structure");
        assert_eq!(
            root.attributes,
            vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
        );
        let names: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["X", "Y", "X"]);
    }

    #[test]
    fn parse_drops_indentation_and_comments() {
        let root = parse("<Structure>\n  <!-- note -->\n  <DbUser>SomeUserName</DbUser>\n</Structure>")
            .unwrap()
            .unwrap();

        assert_eq!(root.text, None);
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].text.as_deref(), Some("SomeUserName"));
    }

    #[test]
    fn parse_keeps_whitespace_only_leaf_text() {
        let root = parse("<Structure><Padded>   </Padded><Empty/></Structure>")
            .unwrap()
            .unwrap();

        assert_eq!(root.children[0].text.as_deref(), Some("   "));
        assert_eq!(root.children[1].text, None);
    }

    #[test]
    fn parse_reports_malformed_markup() {
        let err = parse("<Structure><Open></Structure>").unwrap_err();
        assert!(matches!(err, Error::Parse { ref origin, .. } if origin == "<markup text>"));
    }
}
