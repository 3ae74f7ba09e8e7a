use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    error::{RibandError, RibandResult},
    value::BasicType,
};

/// Storage class of a declared parameter. Decides how many values the
/// parameter needs relative to a primitive's faces, control points and
/// corners.
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
pub enum StorageClass {
    Constant,
    Uniform,
    Varying,
    Vertex,
    #[strum(serialize = "facevarying")]
    FaceVarying,
    #[strum(serialize = "facevertex")]
    FaceVertex,
}

/// Declared type of a parameter. Aggregates decode to float storage; color
/// arity follows the active color descriptor.
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
pub enum DeclType {
    Float,
    #[strum(serialize = "integer", serialize = "int")]
    Integer,
    String,
    Color,
    Point,
    Vector,
    Normal,
    #[strum(serialize = "hpoint")]
    HPoint,
    Matrix,
}

impl DeclType {
    pub fn basic_type(self) -> BasicType {
        match self {
            Self::Integer => BasicType::Integer,
            Self::String => BasicType::String,
            _ => BasicType::Float,
        }
    }

    /// Number of basic values one element of this type occupies, under the
    /// given color channel count.
    pub fn elem_size(self, color_samples: usize) -> usize {
        match self {
            Self::Float | Self::Integer | Self::String => 1,
            Self::Color => color_samples,
            Self::Point | Self::Vector | Self::Normal => 3,
            Self::HPoint => 4,
            Self::Matrix => 16,
        }
    }
}

/// The active color descriptor: channel count plus the two conversion
/// matrices supplied by `ColorSamples` (channel count x 3 each, row major).
/// The default is straight 3-channel RGB.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorDescr {
    pub samples: usize,
    pub n_rgb: Vec<f32>,
    pub rgb_n: Vec<f32>,
}

impl Default for ColorDescr {
    fn default() -> Self {
        let identity = vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
        Self {
            samples: 3,
            n_rgb: identity.clone(),
            rgb_n: identity,
        }
    }
}

impl ColorDescr {
    pub fn new(n_rgb: &[f32], rgb_n: &[f32]) -> RibandResult<Self> {
        if n_rgb.is_empty() || n_rgb.len() % 3 != 0 {
            return Err(RibandError::range(format!(
                "nRGB matrix must be a positive multiple of 3 floats, got {}",
                n_rgb.len()
            )));
        }
        let samples = n_rgb.len() / 3;
        if rgb_n.len() != n_rgb.len() {
            return Err(RibandError::consistency(format!(
                "RGBn matrix must match nRGB ({} floats), got {}",
                n_rgb.len(),
                rgb_n.len()
            )));
        }
        Ok(Self {
            samples,
            n_rgb: n_rgb.to_vec(),
            rgb_n: rgb_n.to_vec(),
        })
    }
}

/// One parameter's type signature: storage class, type and array arity.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Declaration {
    pub name: String,
    pub class: StorageClass,
    pub ty: DeclType,
    pub array_len: usize,
}

impl Declaration {
    pub fn new(name: impl Into<String>, class: StorageClass, ty: DeclType) -> Self {
        Self {
            name: name.into(),
            class,
            ty,
            array_len: 1,
        }
    }

    pub fn with_array_len(mut self, array_len: usize) -> Self {
        self.array_len = array_len;
        self
    }

    /// Basic values per count unit, under the given color channel count.
    pub fn elem_size(&self, color_samples: usize) -> usize {
        self.ty.elem_size(color_samples) * self.array_len
    }

    /// Parses a declaration body, `[class] type [ '[' n ']' ]`, as used by
    /// `Declare`. The storage class defaults to `uniform`.
    pub fn parse_body(name: &str, body: &str) -> RibandResult<Self> {
        let mut parts = Parts::split(body)?;
        let decl = parts.finish_with_name(name.to_string(), body)?;
        Ok(decl)
    }

    /// Parses an inline declaration, `[class] type [ '[' n ']' ] name`, out
    /// of a parameter token. Returns `None` when the token is a bare name
    /// (a dictionary lookup candidate, not an inline declaration); malformed
    /// inline grammar is a syntax error.
    pub fn parse_inline(token: &str) -> RibandResult<Option<Self>> {
        let mut parts = Parts::split(token)?;
        if parts.is_bare_name() {
            return Ok(None);
        }
        let name = parts.take_trailing_name(token)?;
        let decl = parts.finish_with_name(name, token)?;
        Ok(Some(decl))
    }
}

/// Tokenized declaration text: optional class, required type, optional
/// array arity, optional trailing name.
struct Parts {
    class: StorageClass,
    ty: Option<DeclType>,
    array_len: usize,
    rest: Vec<String>,
}

impl Parts {
    fn split(text: &str) -> RibandResult<Self> {
        // Normalize bracket spacing so "float[3]", "float [3]" and
        // "float [ 3 ]" all tokenize the same way.
        let spaced = text.replace('[', " [ ").replace(']', " ] ");
        let mut words = spaced.split_whitespace().peekable();

        let mut class = StorageClass::Uniform;
        let mut ty = None;
        let mut array_len = 1usize;
        let mut rest = Vec::new();

        if let Some(&w) = words.peek() {
            if let Ok(c) = w.parse::<StorageClass>() {
                class = c;
                words.next();
            }
        }
        if let Some(&w) = words.peek() {
            if let Ok(t) = w.parse::<DeclType>() {
                ty = Some(t);
                words.next();
            }
        }
        if ty.is_some() && words.peek() == Some(&"[") {
            words.next();
            let n = words
                .next()
                .ok_or_else(|| RibandError::syntax(format!("unterminated array arity in '{text}'")))?;
            array_len = n.parse::<usize>().map_err(|_| {
                RibandError::syntax(format!("bad array arity '{n}' in '{text}'"))
            })?;
            if array_len == 0 {
                return Err(RibandError::syntax(format!("zero array arity in '{text}'")));
            }
            if words.next() != Some("]") {
                return Err(RibandError::syntax(format!(
                    "unterminated array arity in '{text}'"
                )));
            }
        }
        rest.extend(words.map(str::to_string));

        Ok(Self {
            class,
            ty,
            array_len,
            rest,
        })
    }

    /// A single word that parsed as neither class nor type: a bare token.
    fn is_bare_name(&self) -> bool {
        self.ty.is_none() && self.class == StorageClass::Uniform && self.rest.len() <= 1
    }

    fn take_trailing_name(&mut self, text: &str) -> RibandResult<String> {
        match self.rest.len() {
            1 => Ok(self.rest.remove(0)),
            0 => Err(RibandError::syntax(format!(
                "inline declaration '{text}' has no parameter name"
            ))),
            _ => Err(RibandError::syntax(format!(
                "trailing junk in declaration '{text}'"
            ))),
        }
    }

    fn finish_with_name(self, name: String, text: &str) -> RibandResult<Declaration> {
        let ty = self.ty.ok_or_else(|| {
            RibandError::syntax(format!("declaration '{text}' has no recognizable type"))
        })?;
        if !self.rest.is_empty() {
            return Err(RibandError::syntax(format!(
                "trailing junk in declaration '{text}'"
            )));
        }
        if name.is_empty() {
            return Err(RibandError::syntax(format!(
                "declaration '{text}' has an empty name"
            )));
        }
        Ok(Declaration {
            name,
            class: self.class,
            ty,
            array_len: self.array_len,
        })
    }
}

/// A parameter's resolved declaration, with ownership made explicit:
/// dictionary declarations are shared and never copied, inline declarations
/// are owned by the parameter that parsed them.
#[derive(Clone, Debug)]
pub enum DeclRef {
    Dict(Arc<Declaration>),
    Inline(Box<Declaration>),
}

impl DeclRef {
    pub fn get(&self) -> &Declaration {
        match self {
            Self::Dict(d) => d,
            Self::Inline(d) => d,
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }
}

/// Maps parameter names to their registered declarations. Lookup is pure;
/// color arity is resolved per use from an explicit channel count.
#[derive(Clone, Debug, Default)]
pub struct DeclarationDictionary {
    decls: HashMap<String, Arc<Declaration>>,
}

impl DeclarationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// A dictionary pre-seeded with the interface's standard declarations.
    pub fn with_standard() -> Self {
        let mut dict = Self::new();
        for (name, body) in STANDARD_DECLARATIONS {
            dict.declare(name, body)
                .expect("standard declaration table parses");
        }
        dict
    }

    /// Parses and registers a declaration, replacing any earlier one of the
    /// same name.
    pub fn declare(&mut self, name: &str, body: &str) -> RibandResult<Arc<Declaration>> {
        if name.is_empty() || name.split_whitespace().count() != 1 {
            return Err(RibandError::syntax(format!(
                "'{name}' is not a declarable token"
            )));
        }
        let decl = Arc::new(Declaration::parse_body(name, body)?);
        tracing::debug!(name, body, "declare");
        self.decls.insert(name.to_string(), Arc::clone(&decl));
        Ok(decl)
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<Declaration>> {
        self.decls.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decls.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

/// Standard declarations fixed by the interface.
const STANDARD_DECLARATIONS: &[(&str, &str)] = &[
    ("P", "vertex point"),
    ("Pz", "vertex float"),
    ("Pw", "vertex hpoint"),
    ("N", "varying normal"),
    ("Np", "uniform normal"),
    ("Cs", "varying color"),
    ("Os", "varying color"),
    ("s", "varying float"),
    ("t", "varying float"),
    ("st", "varying float[2]"),
    ("u", "varying float"),
    ("v", "varying float"),
    ("w", "varying float"),
    ("width", "varying float"),
    ("constantwidth", "constant float"),
    ("fov", "float"),
    ("intensity", "float"),
    ("lightcolor", "color"),
    ("from", "point"),
    ("to", "point"),
    ("coneangle", "float"),
    ("conedeltaangle", "float"),
    ("beamdistribution", "float"),
    ("Ka", "float"),
    ("Kd", "float"),
    ("Ks", "float"),
    ("Kr", "float"),
    ("roughness", "float"),
    ("specularcolor", "color"),
    ("texturename", "string"),
    ("name", "string"),
    ("origin", "integer[2]"),
    ("background", "color"),
    ("distance", "float"),
    ("mindistance", "float"),
    ("maxdistance", "float"),
    ("amplitude", "float"),
];
