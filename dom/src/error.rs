use crate::NodeKind;
use nxml_parser::error as scan;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Missing element name")]
    MissingElementName,
    #[error("Missing close tag in element {0}")]
    MissingCloseTag(String),
    #[error("Missing data after \"<\" in element {0}")]
    MissingDataAfterLessThan(String),
    #[error("Missing \">\" in close tag of element {0}")]
    MissingGreaterThanInCloseTag(String),
    #[error("Incorrect close tag in element {name} (found {found})")]
    IncorrectCloseTag { name: String, found: String },
    #[error("Missing \"{terminator}\" after {kind:?} data")]
    Unterminated {
        kind: NodeKind,
        terminator: &'static str,
    },
    #[error("No root element found in xml")]
    NoRootElement,
    #[error("XML root element not defined")]
    RootNotDefined,
    #[error("Illegal element type {0:?}")]
    IllegalElementType(NodeKind),
    #[error("{}", join(.0))]
    Validation(Vec<Violation>),
    #[error("Input is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error(transparent)]
    Scan(#[from] scan::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

// -----------------------------------------------------------------------------------------------

/// Structural rule broken by the top-level constructs of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    #[error("More than one root element found in xml")]
    MoreThanOneRoot,
    #[error("More than one xml declaration found in xml")]
    MoreThanOneDeclaration,
    #[error("More than one doctype declaration found in root")]
    MoreThanOneDocType,
    #[error("Doctype declaration found after root element")]
    DocTypeAfterRoot,
    #[error("No CDATA allowed in root")]
    CDataInRoot,
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
