//! Rows of a formset table and the action that appends a blank one.
//!
//! The container owns the `TOTAL_FORMS` counter. A new row gets the next
//! index and blank field values, built either from the blank-row template
//! or by cloning an existing row and rewriting its indices; both produce the
//! same [`FormRow`].

use contracts::shared::formset::FormsetNaming;

/// One named control of a row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Short field name, e.g. `bien`
    pub field: String,
    /// Posted name, e.g. `items-2-bien`
    pub name: String,
    /// Element id, e.g. `id_items-2-bien`
    pub id: String,
    pub value: String,
}

/// Naming and values of one row of the formset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRow {
    index: usize,
    fields: Vec<FormField>,
}

impl FormRow {
    /// Row at `index` with the given initial values; missing fields stay blank
    pub fn prefilled(
        naming: &FormsetNaming,
        index: usize,
        fields: &[&str],
        values: &[(&str, String)],
    ) -> Self {
        let fields = fields
            .iter()
            .map(|field| FormField {
                field: field.to_string(),
                name: naming.field_name(index, field),
                id: naming.field_id(index, field),
                value: values
                    .iter()
                    .find(|(f, _)| f == field)
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default(),
            })
            .collect();
        Self { index, fields }
    }

    /// Instantiate the blank-row template at `index`
    pub fn from_template(template: &RowTemplate, naming: &FormsetNaming, index: usize) -> Self {
        let fields = template
            .fields
            .iter()
            .map(|f| FormField {
                field: f.field.clone(),
                name: naming.substitute_placeholder(&f.name, index),
                id: naming.substitute_placeholder(&f.id, index),
                value: String::new(),
            })
            .collect();
        Self { index, fields }
    }

    /// Copy `source`, moving every name and id to `index` and blanking values
    pub fn cloned_from(
        source: &FormRow,
        naming: &FormsetNaming,
        index: usize,
    ) -> Result<Self, String> {
        let mut fields = Vec::with_capacity(source.fields.len());
        for f in &source.fields {
            let name = naming
                .rewrite_index(&f.name, index)
                .ok_or_else(|| format!("'{}' is not a field of formset '{}'", f.name, naming.prefix()))?;
            let id = naming
                .rewrite_index(&f.id, index)
                .ok_or_else(|| format!("'{}' is not a field of formset '{}'", f.id, naming.prefix()))?;
            fields.push(FormField {
                field: f.field.clone(),
                name,
                id,
                value: String::new(),
            });
        }
        Ok(Self { index, fields })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    fn find(&self, field: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.field == field)
    }

    pub fn value_of(&self, field: &str) -> Option<&str> {
        self.find(field).map(|f| f.value.as_str())
    }

    pub fn name_of(&self, field: &str) -> String {
        self.find(field).map(|f| f.name.clone()).unwrap_or_default()
    }

    pub fn id_of(&self, field: &str) -> String {
        self.find(field).map(|f| f.id.clone()).unwrap_or_default()
    }
}

/// Blank row whose names carry the `__prefix__` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowTemplate {
    fields: Vec<FormField>,
}

impl RowTemplate {
    pub fn for_fields(naming: &FormsetNaming, fields: &[&str]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|field| FormField {
                    field: field.to_string(),
                    name: naming.template_name(field),
                    id: naming.template_id(field),
                    value: String::new(),
                })
                .collect(),
        }
    }
}

/// How an appended row gets its controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    Template,
    CloneFirst,
}

#[derive(Debug, Clone)]
pub enum BodyRow<R> {
    Item { form: FormRow, row: R },
    /// Trailing row holding the "add" action
    Control,
}

/// Table body of a formset: item rows, each paired with its row state `R`
#[derive(Debug, Clone)]
pub struct TableContainer<R> {
    naming: FormsetNaming,
    template: Option<RowTemplate>,
    total_count: usize,
    initial_count: usize,
    body: Vec<BodyRow<R>>,
}

impl<R> TableContainer<R> {
    pub fn new(naming: FormsetNaming, template: Option<RowTemplate>) -> Self {
        Self {
            naming,
            template,
            total_count: 0,
            initial_count: 0,
            body: Vec::new(),
        }
    }

    /// Append the trailing control row
    pub fn with_control_row(mut self) -> Self {
        self.body.push(BodyRow::Control);
        self
    }

    pub fn naming(&self) -> &FormsetNaming {
        &self.naming
    }

    /// `TOTAL_FORMS`: rows ever added, never decremented
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// `INITIAL_FORMS`
    pub fn initial_count(&self) -> usize {
        self.initial_count
    }

    pub fn set_initial_count(&mut self, count: usize) {
        self.initial_count = count;
    }

    /// Add a row rendered by the server; its index must be the next one
    pub fn push_initial(&mut self, form: FormRow, row: R) -> Result<usize, String> {
        if form.index() != self.total_count {
            return Err(format!(
                "row index {} out of sequence, expected {}",
                form.index(),
                self.total_count
            ));
        }
        Ok(self.insert(form, row))
    }

    /// Append a blank row at the next index and wire it with `make_row`
    pub fn append_with<F>(&mut self, source: RowSource, make_row: F) -> Result<usize, String>
    where
        F: FnOnce(&FormRow) -> R,
    {
        let index = self.total_count;
        let form = match source {
            RowSource::Template => {
                let template = self
                    .template
                    .as_ref()
                    .ok_or_else(|| "no blank-row template".to_string())?;
                FormRow::from_template(template, &self.naming, index)
            }
            RowSource::CloneFirst => {
                let first = self
                    .forms()
                    .next()
                    .ok_or_else(|| "no row to clone".to_string())?;
                FormRow::cloned_from(first, &self.naming, index)?
            }
        };
        let row = make_row(&form);
        Ok(self.insert(form, row))
    }

    /// Template when one is available, otherwise a clone of the first row
    pub fn append<F>(&mut self, make_row: F) -> Result<usize, String>
    where
        F: FnOnce(&FormRow) -> R,
    {
        let source = if self.template.is_some() {
            RowSource::Template
        } else {
            RowSource::CloneFirst
        };
        self.append_with(source, make_row)
    }

    fn insert(&mut self, form: FormRow, row: R) -> usize {
        let index = form.index();
        let item = BodyRow::Item { form, row };
        match self.body.last() {
            Some(BodyRow::Control) => {
                let at = self.body.len() - 1;
                self.body.insert(at, item);
            }
            _ => self.body.push(item),
        }
        self.total_count += 1;
        index
    }

    fn forms(&self) -> impl Iterator<Item = &FormRow> {
        self.body.iter().filter_map(|b| match b {
            BodyRow::Item { form, .. } => Some(form),
            BodyRow::Control => None,
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = (&FormRow, &R)> {
        self.body.iter().filter_map(|b| match b {
            BodyRow::Item { form, row } => Some((form, row)),
            BodyRow::Control => None,
        })
    }

    pub fn body(&self) -> &[BodyRow<R>] {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.rows().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
