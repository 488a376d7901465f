use crate::node::data::doctype::DocTypeData;
use crate::node::data::element::ElementData;

pub mod data;

/// Namespaces an element can live in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Namespace {
    #[default]
    Html,
    Svg,
    MathMl,
}

impl Namespace {
    /// SVG and MathML elements are "foreign" elements
    #[must_use]
    pub fn is_foreign(&self) -> bool {
        !matches!(self, Namespace::Html)
    }
}

/// Different types of nodes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeType {
    DocumentNode,
    DocumentFragmentNode,
    DocTypeNode,
    ElementNode,
    TextNode,
    CommentNode,
    ProcessingInstructionNode,
}

/// A node in the document tree. Containers own their children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Document(Vec<Node>),
    DocumentFragment(Vec<Node>),
    DocType(DocTypeData),
    Element(ElementData),
    Text(String),
    Comment(String),
    /// Never produced by HTML parsing, but XML-ish tree models can carry them
    ProcessingInstruction { target: String, data: String },
}

impl Node {
    #[must_use]
    pub fn document(children: Vec<Node>) -> Self {
        Node::Document(children)
    }

    #[must_use]
    pub fn fragment(children: Vec<Node>) -> Self {
        Node::DocumentFragment(children)
    }

    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    pub fn comment(value: impl Into<String>) -> Self {
        Node::Comment(value.into())
    }

    #[must_use]
    pub fn type_of(&self) -> NodeType {
        match self {
            Node::Document(_) => NodeType::DocumentNode,
            Node::DocumentFragment(_) => NodeType::DocumentFragmentNode,
            Node::DocType(_) => NodeType::DocTypeNode,
            Node::Element(_) => NodeType::ElementNode,
            Node::Text(_) => NodeType::TextNode,
            Node::Comment(_) => NodeType::CommentNode,
            Node::ProcessingInstruction { .. } => NodeType::ProcessingInstructionNode,
        }
    }

    /// Direct children of the node. Leaf nodes have none, and the contents of a template are
    /// not its children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(children) | Node::DocumentFragment(children) => children,
            Node::Element(element) => &element.children,
            Node::DocType(_) | Node::Text(_) | Node::Comment(_) | Node::ProcessingInstruction { .. } => &[],
        }
    }

    /// Appends a child to a container node. Returns false (and drops the child) for leaf nodes.
    pub fn append_child(&mut self, child: Node) -> bool {
        match self {
            Node::Document(children) | Node::DocumentFragment(children) => children.push(child),
            Node::Element(element) => element.children.push(child),
            Node::DocType(_) | Node::Text(_) | Node::Comment(_) | Node::ProcessingInstruction { .. } => return false,
        }

        true
    }

    #[must_use]
    pub fn get_element_data(&self) -> Option<&ElementData> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    #[must_use]
    pub fn get_doctype_data(&self) -> Option<&DocTypeData> {
        match self {
            Node::DocType(doctype) => Some(doctype),
            _ => None,
        }
    }
}

impl From<ElementData> for Node {
    fn from(element: ElementData) -> Self {
        Node::Element(element)
    }
}

impl From<DocTypeData> for Node {
    fn from(doctype: DocTypeData) -> Self {
        Node::DocType(doctype)
    }
}
