pub type RibandResult<T> = Result<T, RibandError>;

/// Protocol error codes, with the interface's numeric values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCode {
    NoMem = 1,
    IllState = 28,
    BadToken = 41,
    Range = 42,
    Consistency = 43,
    BadHandle = 44,
    MissingData = 46,
    Syntax = 47,
}

/// Protocol severity levels, with the interface's numeric values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Severity {
    Info = 0,
    Warning = 1,
    Error = 2,
    Severe = 3,
}

#[derive(thiserror::Error, Debug)]
pub enum RibandError {
    #[error("out of memory: {0}")]
    NoMem(String),

    #[error("illegal state: {0}")]
    IllState(String),

    #[error("bad token: {0}")]
    BadToken(String),

    #[error("out of range: {0}")]
    Range(String),

    #[error("inconsistent request: {0}")]
    Consistency(String),

    #[error("bad handle: {0}")]
    BadHandle(String),

    #[error("missing data: {0}")]
    MissingData(String),

    #[error("syntax error: {0}")]
    Syntax(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl RibandError {
    pub fn ill_state(msg: impl Into<String>) -> Self {
        Self::IllState(msg.into())
    }

    pub fn bad_token(msg: impl Into<String>) -> Self {
        Self::BadToken(msg.into())
    }

    pub fn range(msg: impl Into<String>) -> Self {
        Self::Range(msg.into())
    }

    pub fn consistency(msg: impl Into<String>) -> Self {
        Self::Consistency(msg.into())
    }

    pub fn bad_handle(msg: impl Into<String>) -> Self {
        Self::BadHandle(msg.into())
    }

    pub fn missing_data(msg: impl Into<String>) -> Self {
        Self::MissingData(msg.into())
    }

    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoMem(_) => ErrorCode::NoMem,
            Self::IllState(_) => ErrorCode::IllState,
            Self::BadToken(_) => ErrorCode::BadToken,
            Self::Range(_) => ErrorCode::Range,
            Self::Consistency(_) => ErrorCode::Consistency,
            Self::BadHandle(_) => ErrorCode::BadHandle,
            Self::MissingData(_) => ErrorCode::MissingData,
            Self::Syntax(_) => ErrorCode::Syntax,
            // Backend failures are reported at the backend's own severity;
            // Range is the closest protocol code for "the call went through
            // and the other side rejected it".
            Self::Backend(_) => ErrorCode::Range,
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::NoMem(_) | Self::BadHandle(_) => Severity::Severe,
            _ => Severity::Error,
        }
    }
}
