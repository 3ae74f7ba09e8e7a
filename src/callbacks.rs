use std::fmt;
use std::sync::Arc;

/// The interface's standard pixel filter functions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum FilterFunc {
    Box,
    Triangle,
    #[strum(serialize = "catmull-rom")]
    CatmullRom,
    Gaussian,
    Sinc,
}

/// The interface's standard procedural subdivision functions. The matching
/// free function is implicit: the record owns its data and drops it.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum ProcSubdivFunc {
    DelayedReadArchive,
    RunProgram,
    DynamicLoad,
}

/// The interface's standard error handling modes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorHandlerKind {
    Ignore,
    Print,
    Abort,
}

/// Kind of an archive record line.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ArchiveKind {
    Comment,
    Structure,
    Verbatim,
}

/// Observer invoked for archive records during replay. Value semantics: the
/// recorded call owns a clone, so the caller's instance need not outlive the
/// recording.
#[derive(Clone)]
pub struct ArchiveCallback(Arc<dyn Fn(ArchiveKind, &str) + Send + Sync>);

impl ArchiveCallback {
    pub fn new(f: impl Fn(ArchiveKind, &str) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub fn call(&self, kind: ArchiveKind, record: &str) {
        (self.0)(kind, record);
    }
}

impl fmt::Debug for ArchiveCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ArchiveCallback(..)")
    }
}
