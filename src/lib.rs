#![forbid(unsafe_code)]

pub mod backend;
pub mod callbacks;
pub mod counts;
pub mod declaration;
pub mod error;
pub mod parameter;
pub mod params;
pub mod recorder;
pub mod reel;
pub mod replay;
pub mod request;
pub mod types;
pub mod value;

pub use backend::RenderBackend;
pub use callbacks::{ArchiveCallback, ArchiveKind, ErrorHandlerKind, FilterFunc, ProcSubdivFunc};
pub use counts::{CurveType, PatchType, ValueCounts, Wrap};
pub use declaration::{ColorDescr, DeclType, Declaration, DeclarationDictionary, StorageClass};
pub use error::{ErrorCode, RibandError, RibandResult, Severity};
pub use parameter::Parameter;
pub use params::{NamedParameterList, ParamView, ParameterList};
pub use recorder::Recorder;
pub use reel::{Reel, ReelKind};
pub use replay::{HandleMap, ReplayState};
pub use request::{Call, Request, RequestId};
pub use types::{
    LightHandle, LightId, ObjectHandle, ObjectId, RtBasis, RtBound, RtMatrix, RtPoint,
};
pub use value::{BasicType, RawData, TokenData, Value};
