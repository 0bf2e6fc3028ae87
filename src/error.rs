use std::fmt;

/// Error kinds that can occur in `gossip-hints`.
///
/// The scoring core itself never fails (see crate docs): the only operation
/// with an external failure mode is writing the diagnostic dump to a caller
/// supplied sink.
#[derive(Debug)]
pub enum ErrorKind {
    /// The diagnostic dump's sink returned an I/O error.
    Io(std::io::Error),
}

/// An error, optionally annotated with the file and line where it was raised.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub file: Option<&'static str>,
    pub line: Option<u32>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file) = self.file {
            write!(f, "{file}:")?;
            if let Some(line) = self.line {
                write!(f, "{line}: ")?;
            }
        }
        match &self.kind {
            ErrorKind::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(e) => Some(e),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error {
            kind,
            file: None,
            line: None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        ErrorKind::Io(e).into()
    }
}

/// Tags an `Error` with the file and line it was constructed at.
///
/// ```ignore
/// return Err((ErrorKind::Io(e), file!(), line!()).into());
/// ```
impl From<(ErrorKind, &'static str, u32)> for Error {
    fn from((kind, file, line): (ErrorKind, &'static str, u32)) -> Self {
        Error {
            kind,
            file: Some(file),
            line: Some(line),
        }
    }
}
