//! Field naming contract of the server-side form collection.
//!
//! Every row field is posted as `{prefix}-{index}-{field}` and the collection
//! carries two management counters, `{prefix}-TOTAL_FORMS` and
//! `{prefix}-INITIAL_FORMS`. Indices are positional and never reused.

use serde::{Deserialize, Serialize};

/// Index placeholder used by the blank-row template
pub const PREFIX_PLACEHOLDER: &str = "__prefix__";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsetNaming {
    prefix: String,
}

impl FormsetNaming {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// `items-3-bien`
    pub fn field_name(&self, index: usize, field: &str) -> String {
        format!("{}-{}-{}", self.prefix, index, field)
    }

    /// `id_items-3-bien`
    pub fn field_id(&self, index: usize, field: &str) -> String {
        format!("id_{}", self.field_name(index, field))
    }

    /// `items-__prefix__-bien`
    pub fn template_name(&self, field: &str) -> String {
        format!("{}-{}-{}", self.prefix, PREFIX_PLACEHOLDER, field)
    }

    /// `id_items-__prefix__-bien`
    pub fn template_id(&self, field: &str) -> String {
        format!("id_{}", self.template_name(field))
    }

    pub fn total_forms_name(&self) -> String {
        format!("{}-TOTAL_FORMS", self.prefix)
    }

    pub fn total_forms_id(&self) -> String {
        format!("id_{}", self.total_forms_name())
    }

    pub fn initial_forms_name(&self) -> String {
        format!("{}-INITIAL_FORMS", self.prefix)
    }

    pub fn initial_forms_id(&self) -> String {
        format!("id_{}", self.initial_forms_name())
    }

    /// Replace every index placeholder of a template string
    pub fn substitute_placeholder(&self, template: &str, index: usize) -> String {
        template.replace(PREFIX_PLACEHOLDER, &index.to_string())
    }

    /// Rewrite the positional index of the first `{prefix}-{digits}-` segment.
    ///
    /// Returns `None` when the name does not belong to this formset.
    pub fn rewrite_index(&self, name: &str, index: usize) -> Option<String> {
        let (start, end) = self.index_span(name)?;
        let mut rewritten = String::with_capacity(name.len() + 2);
        rewritten.push_str(&name[..start]);
        rewritten.push_str(&index.to_string());
        rewritten.push_str(&name[end..]);
        Some(rewritten)
    }

    /// Byte range of the digits following the first `{prefix}-` that is
    /// itself followed by `-`
    fn index_span(&self, name: &str) -> Option<(usize, usize)> {
        let marker = format!("{}-", self.prefix);
        for (pos, _) in name.match_indices(&marker) {
            // Must start the name or follow the `id_` prefix
            let boundary = pos == 0 || name[..pos].ends_with('_');
            if !boundary {
                continue;
            }
            let start = pos + marker.len();
            let digits = name[start..]
                .bytes()
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits == 0 {
                continue;
            }
            let end = start + digits;
            if name[end..].starts_with('-') {
                return Some((start, end));
            }
        }
        None
    }
}

impl Default for FormsetNaming {
    fn default() -> Self {
        Self::new("items")
    }
}
