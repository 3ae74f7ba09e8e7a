use crate::error::{RibandError, RibandResult};

/// Storage-level type of a parameter's data. Aggregate declaration types
/// (color, point, matrix, ...) all decode to one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum BasicType {
    Integer,
    Float,
    String,
}

/// Typed storage for one parameter's data. Exactly one backing vector is
/// populated, selected by the declaration's basic type.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Integers(Vec<i32>),
    Floats(Vec<f32>),
    Strings(Vec<String>),
}

impl Value {
    pub fn empty(basic: BasicType) -> Self {
        match basic {
            BasicType::Integer => Self::Integers(Vec::new()),
            BasicType::Float => Self::Floats(Vec::new()),
            BasicType::String => Self::Strings(Vec::new()),
        }
    }

    pub fn basic_type(&self) -> BasicType {
        match self {
            Self::Integers(_) => BasicType::Integer,
            Self::Floats(_) => BasicType::Float,
            Self::Strings(_) => BasicType::String,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Integers(v) => v.len(),
            Self::Floats(v) => v.len(),
            Self::Strings(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_integers(&self) -> Option<&[i32]> {
        match self {
            Self::Integers(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_floats(&self) -> Option<&[f32]> {
        match self {
            Self::Floats(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::Strings(v) => Some(v),
            _ => None,
        }
    }
}

/// Untyped caller-side view of one parameter's data, the crate's rendition
/// of the protocol's `void*` value pointer. `None` stands for a null
/// pointer.
#[derive(Clone, Copy, Debug)]
pub enum RawData<'a> {
    Integers(&'a [i32]),
    Floats(&'a [f32]),
    Strings(&'a [&'a str]),
    None,
}

/// One (token, data) pair as supplied by the caller of a request.
pub type TokenData<'a> = (&'a str, RawData<'a>);

impl RawData<'_> {
    pub fn len(&self) -> usize {
        match self {
            Self::Integers(s) => s.len(),
            Self::Floats(s) => s.len(),
            Self::Strings(s) => s.len(),
            Self::None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies exactly `elems` leading values into typed storage. The
    /// declaration decides `want`; supplying data of a different basic type
    /// is a consistency error, absent or short data is missing data.
    pub fn take(&self, want: BasicType, elems: usize, token: &str) -> RibandResult<Value> {
        if elems == 0 {
            return Ok(Value::empty(want));
        }
        let got = match (self, want) {
            (Self::None, _) => {
                return Err(RibandError::missing_data(format!(
                    "parameter '{token}' expects {elems} values but no data was supplied"
                )));
            }
            (Self::Integers(s), BasicType::Integer) if s.len() >= elems => {
                return Ok(Value::Integers(s[..elems].to_vec()));
            }
            (Self::Floats(s), BasicType::Float) if s.len() >= elems => {
                return Ok(Value::Floats(s[..elems].to_vec()));
            }
            (Self::Strings(s), BasicType::String) if s.len() >= elems => {
                return Ok(Value::Strings(s[..elems].iter().map(|s| s.to_string()).collect()));
            }
            (Self::Integers(_), BasicType::Integer)
            | (Self::Floats(_), BasicType::Float)
            | (Self::Strings(_), BasicType::String) => self.len(),
            _ => {
                return Err(RibandError::consistency(format!(
                    "parameter '{token}' is declared {want:?} but was supplied {:?} data",
                    self.supplied_type()
                )));
            }
        };
        Err(RibandError::missing_data(format!(
            "parameter '{token}' expects {elems} values, got {got}"
        )))
    }

    fn supplied_type(&self) -> Option<BasicType> {
        match self {
            Self::Integers(_) => Some(BasicType::Integer),
            Self::Floats(_) => Some(BasicType::Float),
            Self::Strings(_) => Some(BasicType::String),
            Self::None => None,
        }
    }
}
