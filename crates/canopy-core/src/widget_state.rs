//! Widget state management shared by every widget on a page.
//!
//! The [`WidgetStateManager`] maps widget identity to the widget's last
//! reported value. Widgets report through typed setters and tag each report
//! with a [`Source`]: values that came from user interaction trigger a
//! rerun of the backend script, values seeded on mount or pushed by the
//! backend do not.
//!
//! User edits of widgets that live inside a form are buffered: they stay
//! pending until the form is submitted, at which point they are committed
//! together and a single rerun is requested. Non-UI values of form widgets
//! are committed immediately.
//!
//! # Examples
//!
//! ```
//! use canopy_core::{Source, WidgetInfo, WidgetStateManager, WidgetStore};
//!
//! let mut mgr = WidgetStateManager::default();
//! let info = WidgetInfo::new("start_date");
//!
//! mgr.set_string_array_value(info, vec!["1970/01/01".into()], Source::MOUNT);
//! assert_eq!(
//!     mgr.string_array_value("start_date"),
//!     Some(&["1970/01/01".to_string()][..])
//! );
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Provenance of a reported value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// True when the value changed because of user interaction.
    pub from_ui: bool,
}

impl Source {
    /// Value produced by user interaction.
    pub const UI: Self = Self { from_ui: true };
    /// Value seeded on mount or applied from the backend.
    pub const MOUNT: Self = Self { from_ui: false };
}

/// A widget's value as stored by the manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum WidgetValue {
    /// Ordered list of strings (dates, multiselect options)
    StringArray(Vec<String>),
    /// Single string
    String(String),
    /// Boolean flag
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point number
    Double(f64),
}

/// Identity of a widget as seen by the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetInfo<'a> {
    /// Unique widget id, the store key
    pub id: &'a str,
    /// Enclosing form id, empty when the widget is not in a form
    pub form_id: &'a str,
}

impl<'a> WidgetInfo<'a> {
    /// Identity of a widget outside any form.
    #[must_use]
    pub const fn new(id: &'a str) -> Self {
        Self { id, form_id: "" }
    }

    /// Place the widget in a form.
    #[must_use]
    pub const fn in_form(mut self, form_id: &'a str) -> Self {
        self.form_id = form_id;
        self
    }

    /// Check if the widget belongs to a form.
    #[must_use]
    pub const fn is_in_form(&self) -> bool {
        !self.form_id.is_empty()
    }
}

/// Anything that can describe itself to the manager, typically a widget
/// definition.
pub trait AsWidgetInfo {
    /// The widget identity.
    fn widget_info(&self) -> WidgetInfo<'_>;
}

/// One committed widget value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetState {
    /// Widget id
    pub id: String,
    /// Widget value
    #[serde(flatten)]
    pub value: WidgetValue,
}

/// Snapshot of all committed widget values, ordered by id.
///
/// This is the payload a host ships to the backend on rerun.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetStates {
    /// Committed widget values
    pub widgets: Vec<WidgetState>,
}

impl WidgetStates {
    /// Look up a widget value by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&WidgetValue> {
        self.widgets.iter().find(|w| w.id == id).map(|w| &w.value)
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The part of the store a date-like widget depends on.
///
/// Widgets take the store as a parameter through this trait, so tests can
/// substitute a fake that records every report.
pub trait WidgetStore {
    /// Last known string-array value for a widget id.
    fn string_array_value(&self, id: &str) -> Option<&[String]>;

    /// Report a string-array value.
    fn set_string_array_value(&mut self, widget: WidgetInfo<'_>, value: Vec<String>, source: Source);
}

/// Callbacks the manager invokes towards the host.
pub trait RerunHandler {
    /// A user-originated change was committed; rerun with these values.
    fn send_rerun(&mut self, states: &WidgetStates);

    /// The set of forms with uncommitted changes changed.
    fn pending_forms_changed(&mut self, form_ids: &[String]);
}

/// Handler that ignores every callback.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRerunHandler;

impl RerunHandler for NoopRerunHandler {
    fn send_rerun(&mut self, _states: &WidgetStates) {}

    fn pending_forms_changed(&mut self, _form_ids: &[String]) {}
}

/// Keyed store of widget values shared by all widgets on a page.
pub struct WidgetStateManager {
    committed: BTreeMap<String, WidgetValue>,
    pending_forms: BTreeMap<String, BTreeMap<String, WidgetValue>>,
    handler: Box<dyn RerunHandler>,
}

impl Default for WidgetStateManager {
    fn default() -> Self {
        Self::new(Box::new(NoopRerunHandler))
    }
}

impl std::fmt::Debug for WidgetStateManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetStateManager")
            .field("committed", &self.committed)
            .field("pending_forms", &self.pending_forms)
            .finish_non_exhaustive()
    }
}

impl WidgetStateManager {
    /// Create a manager reporting to the given handler.
    #[must_use]
    pub fn new(handler: Box<dyn RerunHandler>) -> Self {
        Self {
            committed: BTreeMap::new(),
            pending_forms: BTreeMap::new(),
            handler,
        }
    }

    /// Report a string value.
    pub fn set_string_value(
        &mut self,
        widget: WidgetInfo<'_>,
        value: impl Into<String>,
        source: Source,
    ) {
        self.set_value(widget, WidgetValue::String(value.into()), source);
    }

    /// Report a boolean value.
    pub fn set_bool_value(&mut self, widget: WidgetInfo<'_>, value: bool, source: Source) {
        self.set_value(widget, WidgetValue::Bool(value), source);
    }

    /// Report an integer value.
    pub fn set_int_value(&mut self, widget: WidgetInfo<'_>, value: i64, source: Source) {
        self.set_value(widget, WidgetValue::Int(value), source);
    }

    /// Report a floating point value.
    pub fn set_double_value(&mut self, widget: WidgetInfo<'_>, value: f64, source: Source) {
        self.set_value(widget, WidgetValue::Double(value), source);
    }

    fn set_value(&mut self, widget: WidgetInfo<'_>, value: WidgetValue, source: Source) {
        if widget.is_in_form() && source.from_ui {
            trace!("widget {} pending in form {}", widget.id, widget.form_id);
            self.pending_forms
                .entry(widget.form_id.to_string())
                .or_default()
                .insert(widget.id.to_string(), value);
            let ids = self.pending_form_ids();
            self.handler.pending_forms_changed(&ids);
            return;
        }

        debug!("widget {} committed (from_ui={})", widget.id, source.from_ui);
        self.committed.insert(widget.id.to_string(), value);
        if source.from_ui {
            let states = self.widget_states();
            self.handler.send_rerun(&states);
        }
    }

    /// Commit a form's pending values and request a rerun.
    ///
    /// Submitting a form with nothing pending still reruns; an empty
    /// submission is how a form button reports a click.
    pub fn submit_form(&mut self, form_id: &str) {
        let pending = self.pending_forms.remove(form_id).unwrap_or_default();
        debug!("form {form_id} submitted with {} value(s)", pending.len());
        self.committed.extend(pending);

        let states = self.widget_states();
        self.handler.send_rerun(&states);
        let ids = self.pending_form_ids();
        self.handler.pending_forms_changed(&ids);
    }

    /// Ids of forms holding uncommitted values, sorted.
    #[must_use]
    pub fn pending_form_ids(&self) -> Vec<String> {
        self.pending_forms
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(id, _)| id.clone())
            .collect()
    }

    /// Current value for a widget. Pending form values shadow committed ones.
    #[must_use]
    pub fn value(&self, id: &str) -> Option<&WidgetValue> {
        self.pending_forms
            .values()
            .find_map(|values| values.get(id))
            .or_else(|| self.committed.get(id))
    }

    /// Current string value for a widget.
    #[must_use]
    pub fn string_value(&self, id: &str) -> Option<&str> {
        match self.value(id)? {
            WidgetValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Current boolean value for a widget.
    #[must_use]
    pub fn bool_value(&self, id: &str) -> Option<bool> {
        match self.value(id)? {
            WidgetValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Current integer value for a widget.
    #[must_use]
    pub fn int_value(&self, id: &str) -> Option<i64> {
        match self.value(id)? {
            WidgetValue::Int(value) => Some(*value),
            _ => None,
        }
    }

    /// Current floating point value for a widget.
    #[must_use]
    pub fn double_value(&self, id: &str) -> Option<f64> {
        match self.value(id)? {
            WidgetValue::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Snapshot of committed values.
    #[must_use]
    pub fn widget_states(&self) -> WidgetStates {
        WidgetStates {
            widgets: self
                .committed
                .iter()
                .map(|(id, value)| WidgetState {
                    id: id.clone(),
                    value: value.clone(),
                })
                .collect(),
        }
    }

    /// Drop values for widgets that are no longer on the page.
    pub fn remove_inactive<'a>(&mut self, active_ids: impl IntoIterator<Item = &'a str>) {
        let active: BTreeSet<&str> = active_ids.into_iter().collect();
        self.committed.retain(|id, _| active.contains(id.as_str()));
        for values in self.pending_forms.values_mut() {
            values.retain(|id, _| active.contains(id.as_str()));
        }
        self.pending_forms.retain(|_, values| !values.is_empty());
    }
}

impl WidgetStore for WidgetStateManager {
    fn string_array_value(&self, id: &str) -> Option<&[String]> {
        match self.value(id)? {
            WidgetValue::StringArray(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    fn set_string_array_value(&mut self, widget: WidgetInfo<'_>, value: Vec<String>, source: Source) {
        self.set_value(widget, WidgetValue::StringArray(value), source);
    }
}
