use std::collections::BTreeMap;

/// Per-field validation messages of a form.
///
/// `F` is the form's field enum. Keys are kept ordered so that errors render in
/// the same order the fields appear on the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F: Ord> {
    errors: BTreeMap<F, String>,
}

impl<F: Ord> Default for FieldErrors<F> {
    fn default() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }
}

impl<F: Ord + Copy> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error. A later message for the same field replaces the earlier one.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn has(&self, field: F) -> bool {
        self.errors.contains_key(&field)
    }

    /// Clears the error of one field only.
    pub fn clear(&mut self, field: F) {
        self.errors.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Merges `other` into `self`, overwriting messages of the same field.
    pub fn extend(&mut self, other: FieldErrors<F>) {
        self.errors.extend(other.errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    enum Field {
        Name,
        Email,
    }

    #[test]
    fn clear_removes_only_one_field() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Name, "required");
        errors.insert(Field::Email, "invalid");

        errors.clear(Field::Name);

        assert!(!errors.has(Field::Name));
        assert_eq!(errors.get(Field::Email), Some("invalid"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn iterates_in_field_order() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Email, "invalid");
        errors.insert(Field::Name, "required");

        let fields: Vec<Field> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::Name, Field::Email]);
    }
}
