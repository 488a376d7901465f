use crate::node::{Namespace, Node};

/// A single attribute on an element. A value of None is an attribute without value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Attribute {
    pub name: String,
    pub value: Option<String>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }

    pub fn without_value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    /// Value of the attribute, where a missing value is the empty string
    #[must_use]
    pub fn value_or_empty(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }
}

/// Data structure for element nodes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementData {
    /// Local name of the element
    pub name: String,
    pub namespace: Namespace,
    /// Attributes in source order
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    /// Content fragment of a `template` element
    pub template_contents: Option<Box<Node>>,
}

impl ElementData {
    /// Creates a new element in the HTML namespace
    pub fn new(name: impl Into<String>) -> Self {
        Self::new_in(Namespace::Html, name)
    }

    pub fn new_in(namespace: Namespace, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Sets the content fragment of a template element
    #[must_use]
    pub fn with_template_contents(mut self, children: Vec<Node>) -> Self {
        self.template_contents = Some(Box::new(Node::fragment(children)));
        self
    }

    #[must_use]
    pub fn is_namespace(&self, namespace: Namespace) -> bool {
        self.namespace == namespace
    }

    /// Returns true for the HTML `template` element
    #[must_use]
    pub fn is_template(&self) -> bool {
        self.name == "template" && self.is_namespace(Namespace::Html)
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}
