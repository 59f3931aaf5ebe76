use thiserror::Error;

#[derive(Debug, Error)]
pub enum FillError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Docx(#[from] profpack_docx::DocxError),
}

pub type Result<T> = std::result::Result<T, FillError>;
