use thiserror::Error;

/// Errors raised while building the property table
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// A receive or transmit pattern failed to compile
    #[error("invalid pattern for property '{name}': {source}")]
    BadPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// A definition carries neither query, transmit nor receive rules
    #[error("property '{0}' defines no query, transmit or receive rule")]
    EmptyDefinition(String),

    /// Two raw definitions expand to the same property name
    #[error("duplicate property name '{0}'")]
    DuplicateName(String),

    /// A virtual sub-property template with no alternatives
    #[error("sub-property template '{0}' expands to nothing")]
    EmptyTemplate(String),
}

/// Result type for table construction
pub type Result<T> = std::result::Result<T, ProtocolError>;
