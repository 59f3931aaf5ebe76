use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocxError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to read document package: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("document package has no {0} part")]
    MissingPart(&'static str),
    #[error("document part is not valid utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed document xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("malformed document xml: {0}")]
    XmlEscape(#[from] quick_xml::escape::EscapeError),
    #[error("malformed attribute in document xml: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),
    #[error("document xml has mismatched element nesting")]
    UnbalancedXml,
    /// A fragment or run handle no longer points at a live element, which
    /// means the document was restructured after the handle was taken.
    #[error("fragment reference is no longer valid")]
    StaleFragment,
}

pub type Result<T> = std::result::Result<T, DocxError>;
