/// Data structure for doctype nodes
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocTypeData {
    pub name: String,
    pub pub_identifier: Option<String>,
    pub sys_identifier: Option<String>,
}

impl DocTypeData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pub_identifier: None,
            sys_identifier: None,
        }
    }

    #[must_use]
    pub fn with_pub_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.pub_identifier = Some(identifier.into());
        self
    }

    #[must_use]
    pub fn with_sys_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.sys_identifier = Some(identifier.into());
        self
    }
}
