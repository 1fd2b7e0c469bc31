//! Owned element tree produced by the markup parser

/// Attribute that binds an element to an identity scope
pub const IDENTITY_ATTRIBUTE: &str = "identity";

/// A single markup element with its attributes, text and child elements.
///
/// Attributes keep document order. `text` holds the concatenation of the
/// element's direct text nodes exactly as written. It is `None` when there is
/// no text, or when the element has child elements and the text between them
/// is only whitespace. A leaf keeps whitespace-only text as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element with the given tag name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    /// Builder-style helper to add an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Builder-style helper to set the text content.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder-style helper to append a child element.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The identity this element declares, if any.
    pub fn identity(&self) -> Option<&str> {
        self.attribute(IDENTITY_ATTRIBUTE)
    }

    /// True when the element has no child elements.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of siblings in `children` that share `name`.
    pub fn count_children_named(&self, name: &str) -> usize {
        self.children.iter().filter(|c| c.name == name).count()
    }
}
