use std::collections::HashMap;

use crate::{
    counts::ValueCounts,
    declaration::{ColorDescr, DeclType, DeclarationDictionary},
    error::{RibandError, RibandResult},
    parameter::Parameter,
    value::{TokenData, Value},
};

/// Ordered, name-keyed collection of a request's bound parameters.
/// Duplicate tokens are last-write-wins: the earlier entry is erased and the
/// replacement appended at the end.
#[derive(Clone, Debug, Default)]
pub struct ParameterList {
    params: Vec<Parameter>,
    index: HashMap<String, usize>,
    next_position: usize,
}

impl ParameterList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a list from scratch: the request-construction entry point.
    pub fn bind(
        counts: &ValueCounts,
        dict: &DeclarationDictionary,
        colors: &ColorDescr,
        items: &[TokenData<'_>],
    ) -> RibandResult<Self> {
        let mut list = Self::new();
        list.add(counts, dict, colors, items)?;
        Ok(list)
    }

    /// Binds and appends `items`. A failed bind leaves the list as it was
    /// before the call.
    pub fn add(
        &mut self,
        counts: &ValueCounts,
        dict: &DeclarationDictionary,
        colors: &ColorDescr,
        items: &[TokenData<'_>],
    ) -> RibandResult<()> {
        let mut bound = Vec::with_capacity(items.len());
        for (i, (token, data)) in items.iter().enumerate() {
            bound.push(Parameter::bind(
                token,
                *data,
                self.next_position + i,
                counts,
                dict,
                colors,
            )?);
        }
        for p in bound {
            self.push(p);
        }
        Ok(())
    }

    /// Appends an already-bound parameter, replacing any entry of the same
    /// resolved name.
    pub(crate) fn push(&mut self, mut param: Parameter) {
        self.erase(param.name());
        param.set_position(self.next_position);
        self.next_position += 1;
        self.index
            .insert(param.name().to_string(), self.params.len());
        self.params.push(param);
    }

    /// Removes the parameter with the given resolved name. Returns whether
    /// an entry was removed.
    pub fn erase(&mut self, name: &str) -> bool {
        let Some(at) = self.index.remove(name) else {
            return false;
        };
        self.params.remove(at);
        for idx in self.index.values_mut() {
            if *idx > at {
                *idx -= 1;
            }
        }
        true
    }

    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.index.get(name).map(|&i| &self.params[i])
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters in list order.
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Whether any parameter is declared with the color type.
    pub fn has_color(&self) -> bool {
        self.params
            .iter()
            .any(|p| p.declaration().ty == DeclType::Color)
    }

    /// The parallel (tokens, values) view handed to backend calls. Built at
    /// read time, so it always reflects current list order.
    pub fn view(&self) -> ParamView<'_> {
        ParamView {
            tokens: self.params.iter().map(|p| p.token()).collect(),
            values: self.params.iter().map(|p| p.value()).collect(),
        }
    }
}

/// Parallel token/value arrays for one request, in list order: the unpacked
/// form a replay call hands to the backend.
#[derive(Clone, Debug)]
pub struct ParamView<'a> {
    tokens: Vec<&'a str>,
    values: Vec<&'a Value>,
}

impl<'a> ParamView<'a> {
    pub fn empty() -> Self {
        Self {
            tokens: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn values(&self) -> &[&'a Value] {
        &self.values
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a Value)> + '_ {
        self.tokens.iter().copied().zip(self.values.iter().copied())
    }
}

/// A parameter list attached to a named entity (shader, light, option
/// block). Remembers the color descriptor its color parameters were bound
/// under and rejects rebinding under a different one.
#[derive(Clone, Debug)]
pub struct NamedParameterList {
    name: String,
    colors: Option<ColorDescr>,
    list: ParameterList,
}

impl NamedParameterList {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: None,
            list: ParameterList::new(),
        }
    }

    pub fn bind(
        name: impl Into<String>,
        counts: &ValueCounts,
        dict: &DeclarationDictionary,
        colors: &ColorDescr,
        items: &[TokenData<'_>],
    ) -> RibandResult<Self> {
        let mut named = Self::new(name);
        named.add(counts, dict, colors, items)?;
        Ok(named)
    }

    /// Binds and merges `items`; color parameters must use one consistent
    /// descriptor across every `add` on the same name.
    pub fn add(
        &mut self,
        counts: &ValueCounts,
        dict: &DeclarationDictionary,
        colors: &ColorDescr,
        items: &[TokenData<'_>],
    ) -> RibandResult<()> {
        let incoming = ParameterList::bind(counts, dict, colors, items)?;
        if incoming.has_color() {
            match &self.colors {
                Some(bound) if bound != colors => {
                    return Err(RibandError::consistency(format!(
                        "'{}' already holds color parameters with {} samples, cannot rebind with {}",
                        self.name, bound.samples, colors.samples
                    )));
                }
                _ => self.colors = Some(colors.clone()),
            }
        }
        for p in incoming.params {
            self.list.push(p);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Descriptor the list's color parameters were bound under, if any.
    pub fn color_descr(&self) -> Option<&ColorDescr> {
        self.colors.as_ref()
    }

    pub fn params(&self) -> &ParameterList {
        &self.list
    }

    pub fn view(&self) -> ParamView<'_> {
        self.list.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ErrorCode, value::RawData};

    fn dict() -> DeclarationDictionary {
        DeclarationDictionary::with_standard()
    }

    fn singles() -> ValueCounts {
        ValueCounts::singles()
    }

    #[test]
    fn preserves_insertion_order_in_view() {
        let list = ParameterList::bind(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[
                ("Ka", RawData::Floats(&[0.2])),
                ("Kd", RawData::Floats(&[0.8])),
                ("texturename", RawData::Strings(&["grid.tex"])),
            ],
        )
        .unwrap();
        let view = list.view();
        assert_eq!(view.tokens(), &["Ka", "Kd", "texturename"]);
        assert_eq!(view.values()[1].as_floats().unwrap(), &[0.8]);
    }

    #[test]
    fn last_write_wins_replaces_and_reorders() {
        let mut list = ParameterList::bind(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[
                ("Ka", RawData::Floats(&[0.2])),
                ("Kd", RawData::Floats(&[0.8])),
            ],
        )
        .unwrap();
        list.add(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[("Ka", RawData::Floats(&[0.9]))],
        )
        .unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(list.get("Ka").unwrap().value().as_floats().unwrap(), &[0.9]);
        // The replacement moved to the end of the list.
        assert_eq!(list.view().tokens(), &["Kd", "Ka"]);
    }

    #[test]
    fn duplicate_tokens_in_one_batch_keep_the_later() {
        let list = ParameterList::bind(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[
                ("Ka", RawData::Floats(&[0.1])),
                ("Ka", RawData::Floats(&[0.7])),
            ],
        )
        .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get("Ka").unwrap().value().as_floats().unwrap(), &[0.7]);
    }

    #[test]
    fn inline_token_indexed_by_resolved_name() {
        let list = ParameterList::bind(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[("uniform float gain", RawData::Floats(&[2.0]))],
        )
        .unwrap();
        assert!(list.get("gain").is_some());
        assert_eq!(list.view().tokens(), &["uniform float gain"]);
    }

    #[test]
    fn erase_removes_from_list_and_index() {
        let mut list = ParameterList::bind(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[
                ("Ka", RawData::Floats(&[0.2])),
                ("Kd", RawData::Floats(&[0.8])),
            ],
        )
        .unwrap();
        assert!(list.erase("Ka"));
        assert!(!list.erase("Ka"));
        assert_eq!(list.len(), 1);
        assert!(list.get("Kd").is_some());
        assert_eq!(list.view().tokens(), &["Kd"]);
    }

    #[test]
    fn failed_add_leaves_list_untouched() {
        let mut list = ParameterList::bind(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[("Ka", RawData::Floats(&[0.2]))],
        )
        .unwrap();
        let err = list
            .add(
                &singles(),
                &dict(),
                &ColorDescr::default(),
                &[
                    ("Kd", RawData::Floats(&[0.8])),
                    ("nosuch", RawData::Floats(&[1.0])),
                ],
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::BadToken);
        assert_eq!(list.len(), 1);
        assert!(list.get("Kd").is_none());
    }

    #[test]
    fn vertex_param_against_zero_count_is_empty_not_missing() {
        let list = ParameterList::bind(
            &ValueCounts::polygon(0),
            &dict(),
            &ColorDescr::default(),
            &[("P", RawData::Floats(&[]))],
        )
        .unwrap();
        assert!(list.get("P").unwrap().value().is_empty());
    }

    #[test]
    fn vertex_param_without_data_is_missing() {
        let err = ParameterList::bind(
            &ValueCounts::polygon(3),
            &dict(),
            &ColorDescr::default(),
            &[("P", RawData::None)],
        )
        .unwrap_err();
        assert_eq!(err.code(), ErrorCode::MissingData);
    }

    #[test]
    fn has_color_detects_color_typed_entries() {
        let list = ParameterList::bind(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[("Cs", RawData::Floats(&[1.0, 0.0, 0.0]))],
        )
        .unwrap();
        assert!(list.has_color());

        let plain = ParameterList::bind(
            &singles(),
            &dict(),
            &ColorDescr::default(),
            &[("Ka", RawData::Floats(&[0.5]))],
        )
        .unwrap();
        assert!(!plain.has_color());
    }

    #[test]
    fn named_list_rejects_mismatched_color_descriptors() {
        let three = ColorDescr::default();
        let four = ColorDescr::new(&[1.0; 12], &[1.0; 12]).unwrap();

        let mut named = NamedParameterList::new("matte");
        named
            .add(
                &singles(),
                &dict(),
                &three,
                &[("lightcolor", RawData::Floats(&[1.0, 1.0, 1.0]))],
            )
            .unwrap();

        let err = named
            .add(
                &singles(),
                &dict(),
                &four,
                &[("specularcolor", RawData::Floats(&[1.0, 1.0, 1.0, 1.0]))],
            )
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Consistency);
    }

    #[test]
    fn named_list_accepts_same_descriptor_twice() {
        let three = ColorDescr::default();
        let mut named = NamedParameterList::new("matte");
        for token in ["lightcolor", "specularcolor"] {
            named
                .add(
                    &singles(),
                    &dict(),
                    &three,
                    &[(token, RawData::Floats(&[1.0, 1.0, 1.0]))],
                )
                .unwrap();
        }
        assert_eq!(named.params().len(), 2);
        assert_eq!(named.color_descr().unwrap().samples, 3);
    }

    #[test]
    fn non_color_adds_ignore_descriptor_changes() {
        let three = ColorDescr::default();
        let four = ColorDescr::new(&[1.0; 12], &[1.0; 12]).unwrap();
        let mut named = NamedParameterList::new("trim");
        named
            .add(
                &singles(),
                &dict(),
                &three,
                &[("lightcolor", RawData::Floats(&[1.0, 1.0, 1.0]))],
            )
            .unwrap();
        named
            .add(
                &singles(),
                &dict(),
                &four,
                &[("Ka", RawData::Floats(&[0.3]))],
            )
            .unwrap();
        assert_eq!(named.params().len(), 2);
    }
}
