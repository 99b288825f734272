// SPDX-License-Identifier: MIT
//
// Interactive widgets: menus and a single-line text input.
//
// Each widget is a blocking loop on `Session`. One iteration pops at most one
// key, looks at the mouse record, updates the widget state, and redraws
// (then presents) only when that state changed. With no key queued the loop
// idles for one poll interval, so something must feed the input buffers:
// a pump thread in an application, `push_keys` in a test.
//
// Widgets tag the cells they draw with cell ids so the mouse can be mapped
// back to an item, and reset those ids when they return.

pub mod menu;
pub mod text_input;

/// Ordered items for a menu: an alias to return and a value to display.
///
/// ```
/// use tessera_term::widgets::Selection;
///
/// let mut selection = Selection::new();
/// selection.add("new", "New file");
/// selection.add("quit", "Quit");
/// assert_eq!(selection.len(), 2);
/// assert_eq!(selection.alias(1), Some("quit"));
/// assert_eq!(selection.value(0), Some("New file"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    aliases: Vec<String>,
    values: Vec<String>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, alias: impl Into<String>, value: impl Into<String>) {
        self.aliases.push(alias.into());
        self.values.push(value.into());
    }

    pub fn clear(&mut self) {
        self.aliases.clear();
        self.values.clear();
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn alias(&self, index: usize) -> Option<&str> {
        self.aliases.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// Display values in order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }
}

impl<A: Into<String>, V: Into<String>> FromIterator<(A, V)> for Selection {
    fn from_iter<I: IntoIterator<Item = (A, V)>>(iter: I) -> Self {
        let mut selection = Self::new();
        for (alias, value) in iter {
            selection.add(alias, value);
        }
        selection
    }
}

/// A count as a signed cell offset, saturating.
pub(crate) fn cells(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}
