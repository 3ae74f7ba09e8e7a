use crate::{
    counts::ValueCounts,
    declaration::{ColorDescr, DeclRef, Declaration, DeclarationDictionary},
    error::{RibandError, RibandResult},
    value::{RawData, Value},
};

/// One bound (token, data) pair of a request's parameter tail: the resolved
/// declaration, the channel count it was bound under, and the typed copy of
/// the caller's data.
#[derive(Clone, Debug)]
pub struct Parameter {
    token: String,
    decl: DeclRef,
    color_samples: usize,
    position: usize,
    value: Value,
}

impl Parameter {
    /// Resolves `token` against the dictionary (or parses it as an inline
    /// declaration), computes the expected element count for this call, and
    /// copies the caller's data into typed storage. A failed bind produces
    /// no parameter at all.
    pub fn bind(
        token: &str,
        data: RawData<'_>,
        position: usize,
        counts: &ValueCounts,
        dict: &DeclarationDictionary,
        colors: &ColorDescr,
    ) -> RibandResult<Self> {
        let decl = match dict.lookup(token) {
            Some(d) => DeclRef::Dict(d),
            None => match Declaration::parse_inline(token)? {
                Some(d) => DeclRef::Inline(Box::new(d)),
                None => {
                    return Err(RibandError::bad_token(format!(
                        "'{token}' is neither declared nor an inline declaration"
                    )));
                }
            },
        };

        let elems = counts.select(decl.get().class) * decl.get().elem_size(colors.samples);
        let value = data.take(decl.get().ty.basic_type(), elems, token)?;

        Ok(Self {
            token: token.to_string(),
            decl,
            color_samples: colors.samples,
            position,
            value,
        })
    }

    /// The token exactly as the caller supplied it (for inline declarations
    /// this is the full declaration text).
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The resolved parameter name, the key used for list lookup.
    pub fn name(&self) -> &str {
        &self.decl.get().name
    }

    pub fn declaration(&self) -> &Declaration {
        self.decl.get()
    }

    pub fn is_inline(&self) -> bool {
        self.decl.is_inline()
    }

    /// Channel count the parameter was bound under; fixes the arity of a
    /// color-typed value independently of later descriptor changes.
    pub fn color_samples(&self) -> usize {
        self.color_samples
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}
