//! `DateInput` widget: a labelled date (or date range) field backed by the
//! shared widget store.
//!
//! The widget keeps its current value as native dates and reports the
//! serialized form (`YYYY/MM/DD`) to a [`WidgetStore`] whenever the value
//! changes. The calendar control itself is provided by the host through the
//! [`DatePicker`] trait; the host forwards the picker's selections to
//! [`DateInput::handle_change`].

use crate::date_codec::{self, PICKER_FORMAT_STRING};
use crate::date_picker::{DatePicker, DatePickerChange, PickerProps};
use crate::error::DefinitionError;
use crate::label::{escape_html, WidgetLabel};
use canopy_core::{
    widget::{AccessibleRole, LayoutResult, TextStyle},
    AsWidgetInfo, Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, Event,
    Key, Point, Rect, Size, Source, TypeId, Widget, WidgetInfo, WidgetStore,
};
use chrono::NaiveDate;
use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Duration;

/// Class token carried by every date input root element.
pub const CLASS_TOKEN: &str = "stDateInput";

/// A single date or the two ends of a range.
const MAX_VALUES: usize = 2;

const MIN_FIELD_WIDTH: f32 = 160.0;

const PLACEHOLDER: &str = "YYYY/MM/DD";

const DATE_INPUT_ASSERTIONS: &[BrickAssertion] = &[
    BrickAssertion::TextVisible,
    BrickAssertion::custom("value_arity"),
    BrickAssertion::ContrastRatio(4.5),
    BrickAssertion::element_present(".stDateInput"),
];

// =============================================================================
// Definition
// =============================================================================

/// Immutable description of a date input, as sent by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateInputElement {
    /// Unique widget id, the store key
    pub id: String,
    /// Label text
    pub label: String,
    /// Serialized default dates (0, 1 or 2 entries)
    pub default: Vec<String>,
    /// Serialized inclusive lower bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<String>,
    /// Serialized inclusive upper bound
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    /// Whether the picker selects a range
    pub is_range: bool,
    /// Enclosing form id, empty outside forms
    #[serde(skip_serializing_if = "String::is_empty")]
    pub form_id: String,
    /// Tooltip text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl DateInputElement {
    /// Create a definition with no default and no bounds.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Set the serialized default value.
    #[must_use]
    pub fn default_value<I, S>(mut self, dates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default = dates.into_iter().map(Into::into).collect();
        self
    }

    /// Set the serialized lower bound.
    #[must_use]
    pub fn min(mut self, min: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set the serialized upper bound.
    #[must_use]
    pub fn max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Select a range instead of a single date.
    #[must_use]
    pub const fn range(mut self, is_range: bool) -> Self {
        self.is_range = is_range;
        self
    }

    /// Place the widget in a form.
    #[must_use]
    pub fn in_form(mut self, form_id: impl Into<String>) -> Self {
        self.form_id = form_id.into();
        self
    }

    /// Set tooltip text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Load a definition from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the document does not match the
    /// schema or describes an invalid widget.
    pub fn from_json(json: &str) -> Result<Self, DefinitionError> {
        let element: Self = serde_json::from_str(json)?;
        element.validate()?;
        Ok(element)
    }

    /// Load a definition from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError`] when the document does not match the
    /// schema or describes an invalid widget.
    pub fn from_yaml(yaml: &str) -> Result<Self, DefinitionError> {
        let element: Self = serde_yaml_ng::from_str(yaml)?;
        element.validate()?;
        Ok(element)
    }

    /// Check the structural rules a definition must follow.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MissingId`] for an empty id and
    /// [`DefinitionError::TooManyDefaults`] for more than two defaults.
    pub fn validate(&self) -> Result<(), DefinitionError> {
        if self.id.trim().is_empty() {
            return Err(DefinitionError::MissingId);
        }
        if self.default.len() > MAX_VALUES {
            return Err(DefinitionError::TooManyDefaults {
                id: self.id.clone(),
                count: self.default.len(),
            });
        }
        Ok(())
    }
}

impl AsWidgetInfo for DateInputElement {
    fn widget_info(&self) -> WidgetInfo<'_> {
        WidgetInfo::new(&self.id).in_form(&self.form_id)
    }
}

// =============================================================================
// Configuration and messages
// =============================================================================

/// Host-supplied configuration for a date input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateInputProps {
    /// Layout width in pixels (0 = auto)
    pub width: f32,
    /// Whether the widget ignores interaction
    pub disabled: bool,
}

impl DateInputProps {
    /// Set the layout width.
    #[must_use]
    pub const fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

/// Descriptor of the outermost rendered element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootElement {
    /// Space separated class names
    pub class_name: String,
    /// Layout width in pixels (0 = auto)
    pub width: f32,
}

impl RootElement {
    /// Check whether `token` is one of the class names.
    #[must_use]
    pub fn has_class(&self, token: &str) -> bool {
        self.class_name.split_whitespace().any(|class| class == token)
    }

    /// CSS value for the inline width.
    #[must_use]
    pub fn style_width(&self) -> String {
        if self.width > 0.0 {
            format!("{}px", self.width)
        } else {
            "auto".to_string()
        }
    }
}

/// Lifecycle phase of a mounted date input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateInputPhase {
    /// Value seeded from the store or the default
    #[default]
    Initialized,
    /// The user changed the value at least once
    Interacting,
}

/// Message emitted when the value changes through interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateInputChanged {
    /// Widget id
    pub id: String,
    /// Serialized value reported to the store
    pub values: Vec<String>,
}

// =============================================================================
// Widget
// =============================================================================

/// A mounted date input.
#[derive(Debug, Clone)]
pub struct DateInput {
    element: DateInputElement,
    props: DateInputProps,
    /// Current value, 0 to 2 dates
    value: Vec<NaiveDate>,
    min_date: NaiveDate,
    max_date: Option<NaiveDate>,
    phase: DateInputPhase,
    label: WidgetLabel,
    text_style: TextStyle,
    placeholder_color: Color,
    background_color: Color,
    disabled_background_color: Color,
    border_color: Color,
    focus_border_color: Color,
    padding: f32,
    bounds: Rect,
    field_bounds: Rect,
    focused: bool,
}

impl DateInput {
    /// Mount a date input.
    ///
    /// The value is the store's last value for the element id when there is
    /// one, else the element default. The resolved value is reported back
    /// to the store once, as a non-UI change.
    pub fn mount(
        element: DateInputElement,
        props: DateInputProps,
        store: &mut impl WidgetStore,
    ) -> Self {
        let serialized = store
            .string_array_value(&element.id)
            .map_or_else(|| element.default.clone(), <[String]>::to_vec);
        let value = limit_arity(date_codec::decode_all(&serialized), &element.id);

        let min_date = resolve_bound(&element.id, "min", element.min.as_deref())
            .unwrap_or_else(date_codec::default_min_date);
        let max_date = resolve_bound(&element.id, "max", element.max.as_deref());

        let label = WidgetLabel::new(element.label.clone())
            .help(element.help.clone())
            .disabled(props.disabled);

        let widget = Self {
            element,
            props,
            value,
            min_date,
            max_date,
            phase: DateInputPhase::Initialized,
            label,
            text_style: TextStyle::default(),
            placeholder_color: Color::new(0.6, 0.6, 0.6, 1.0),
            background_color: Color::WHITE,
            disabled_background_color: Color::new(0.95, 0.95, 0.95, 1.0),
            border_color: Color::new(0.8, 0.8, 0.8, 1.0),
            focus_border_color: Color::new(1.0, 0.29, 0.29, 1.0),
            padding: 8.0,
            bounds: Rect::default(),
            field_bounds: Rect::default(),
            focused: false,
        };
        debug!(
            "mounted date input {} with {:?} (min {}, max {:?})",
            widget.element.id, widget.value, widget.min_date, widget.max_date
        );
        widget.report(store, Source::MOUNT);
        widget
    }

    /// Props for the host's calendar control.
    #[must_use]
    pub fn picker_props(&self) -> PickerProps {
        PickerProps {
            value: self.value.clone(),
            disabled: self.props.disabled,
            range: self.element.is_range,
            ..PickerProps::new(self.min_date, self.max_date)
        }
    }

    /// Hand the current props to the picker and describe the root element.
    pub fn render(&self, picker: &mut dyn DatePicker) -> RootElement {
        picker.render(&self.picker_props());
        self.root()
    }

    /// Root element descriptor.
    #[must_use]
    pub fn root(&self) -> RootElement {
        RootElement {
            class_name: format!("row-widget {CLASS_TOKEN}"),
            width: self.props.width,
        }
    }

    /// Apply a selection reported by the picker.
    ///
    /// Returns `None` when the widget is disabled; otherwise the new value
    /// is reported to the store as a UI change.
    pub fn handle_change(
        &mut self,
        change: DatePickerChange,
        store: &mut impl WidgetStore,
    ) -> Option<DateInputChanged> {
        if self.props.disabled {
            trace!("ignoring change on disabled date input {}", self.element.id);
            return None;
        }
        let dates = limit_arity(change.date.into_dates(), &self.element.id);
        trace!("date input {} changed to {dates:?}", self.element.id);
        self.value = dates;
        self.phase = DateInputPhase::Interacting;
        Some(self.report(store, Source::UI))
    }

    /// Restore the default value, as when the enclosing form is cleared.
    pub fn reset_to_default(&mut self, store: &mut impl WidgetStore) -> DateInputChanged {
        self.value = limit_arity(
            date_codec::decode_all(&self.element.default),
            &self.element.id,
        );
        self.phase = DateInputPhase::Interacting;
        self.report(store, Source::UI)
    }

    /// Replace the value with one pushed by the backend.
    pub fn apply_backend_value(&mut self, values: &[String], store: &mut impl WidgetStore) {
        self.value = limit_arity(date_codec::decode_all(values), &self.element.id);
        debug!(
            "date input {} set from backend to {:?}",
            self.element.id, self.value
        );
        self.report(store, Source::MOUNT);
    }

    fn report(&self, store: &mut impl WidgetStore, source: Source) -> DateInputChanged {
        let values = date_codec::encode_all(&self.value);
        store.set_string_array_value(self.element.widget_info(), values.clone(), source);
        DateInputChanged {
            id: self.element.id.clone(),
            values,
        }
    }

    /// Current value.
    #[must_use]
    pub fn values(&self) -> &[NaiveDate] {
        &self.value
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn min_date(&self) -> NaiveDate {
        self.min_date
    }

    /// Inclusive upper bound, if any.
    #[must_use]
    pub const fn max_date(&self) -> Option<NaiveDate> {
        self.max_date
    }

    /// Lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> DateInputPhase {
        self.phase
    }

    /// The definition this widget was mounted from.
    #[must_use]
    pub const fn element(&self) -> &DateInputElement {
        &self.element
    }

    /// Host configuration.
    #[must_use]
    pub const fn props(&self) -> DateInputProps {
        self.props
    }

    /// Check if the field has focus.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Value as shown in the field, range ends joined by ` - `.
    #[must_use]
    pub fn display_text(&self) -> String {
        date_codec::encode_all(&self.value).join(" - ")
    }

    fn field_height(&self) -> f32 {
        self.text_style.size + self.padding * 2.0
    }

    fn field_text_style(&self) -> TextStyle {
        let mut style = self.text_style.clone();
        if self.value.is_empty() {
            style.color = self.placeholder_color;
        } else if self.props.disabled {
            style.color = Color::new(style.color.r, style.color.g, style.color.b, 0.4);
        }
        style
    }
}

/// Decode an optional bound, logging and ignoring malformed ones.
fn resolve_bound(id: &str, which: &str, raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw.filter(|s| !s.trim().is_empty())?;
    match date_codec::decode(raw) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("date input {id}: ignoring malformed {which} bound: {err}");
            None
        }
    }
}

fn limit_arity(mut dates: Vec<NaiveDate>, id: &str) -> Vec<NaiveDate> {
    if dates.len() > MAX_VALUES {
        warn!(
            "date input {id}: keeping the first {MAX_VALUES} of {} dates",
            dates.len()
        );
        dates.truncate(MAX_VALUES);
    }
    dates
}

impl Widget for DateInput {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = if self.props.width > 0.0 {
            self.props.width
        } else {
            let label = self.label.measure(Constraints::unbounded());
            label.width.max(MIN_FIELD_WIDTH)
        };
        let height = self.label.line_height() + self.field_height();
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        let (label_bounds, field_bounds) = bounds.split_top(self.label.line_height());
        self.label.layout(label_bounds);
        self.field_bounds = field_bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        self.label.paint(canvas);

        let background = if self.props.disabled {
            self.disabled_background_color
        } else {
            self.background_color
        };
        canvas.fill_rect(self.field_bounds, background);

        let border = if self.focused {
            self.focus_border_color
        } else {
            self.border_color
        };
        canvas.stroke_rect(self.field_bounds, border, 1.0);

        let text = if self.value.is_empty() {
            PLACEHOLDER.to_string()
        } else {
            self.display_text()
        };
        let position = Point::new(
            self.field_bounds.x + self.padding,
            self.field_bounds.y + self.padding,
        );
        canvas.draw_text(&text, position, &self.field_text_style());
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.props.disabled {
            return None;
        }
        match event {
            Event::MouseDown { position, .. } => {
                self.focused = self.field_bounds.contains_point(position);
            }
            Event::FocusIn => self.focused = true,
            Event::FocusOut
            | Event::KeyDown {
                key: Key::Escape, ..
            } => self.focused = false,
            Event::KeyDown { .. } => {}
        }
        // Selections arrive through the picker, not raw events.
        None
    }

    fn is_interactive(&self) -> bool {
        !self.props.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.props.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.element.label)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::DatePicker
    }

    fn test_id(&self) -> Option<&str> {
        Some(CLASS_TOKEN)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for DateInput {
    fn brick_name(&self) -> &'static str {
        "DateInput"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        DATE_INPUT_ASSERTIONS
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification {
            verification_time: Duration::from_micros(10),
            ..BrickVerification::default()
        };
        verification.check(
            BrickAssertion::TextVisible,
            !self.element.label.is_empty(),
            "Date input label is empty",
        );
        verification.check(
            BrickAssertion::custom("value_arity"),
            self.value.len() <= MAX_VALUES,
            format!("{} dates, at most {MAX_VALUES} allowed", self.value.len()),
        );
        // Disabled fields are dimmed on purpose
        let contrast = self
            .text_style
            .color
            .contrast_ratio(&self.background_color);
        verification.check(
            BrickAssertion::ContrastRatio(4.5),
            self.props.disabled || contrast >= 4.5,
            format!("Contrast ratio {contrast:.2}:1 below 4.5:1"),
        );
        verification.check(
            BrickAssertion::element_present(".stDateInput"),
            self.root().has_class(CLASS_TOKEN),
            "Root element lacks the stDateInput class",
        );
        verification
    }

    fn to_html(&self) -> String {
        let root = self.root();
        let max = self
            .max_date
            .map(|date| format!(r#" max="{}""#, date_codec::encode(date)))
            .unwrap_or_default();
        let range = if self.element.is_range {
            r#" data-range="true""#
        } else {
            ""
        };
        let disabled = if self.props.disabled { " disabled" } else { "" };
        format!(
            r#"<div class="{}" style="width: {}" data-testid="{CLASS_TOKEN}">{}<input type="text" value="{}" placeholder="{PLACEHOLDER}" min="{}"{max} data-format="{PICKER_FORMAT_STRING}"{range}{disabled}></div>"#,
            root.class_name,
            root.style_width(),
            self.label.to_html(),
            escape_html(&self.display_text()),
            date_codec::encode(self.min_date),
        )
    }

    fn to_css(&self) -> String {
        format!(
            r".stDateInput {{
    width: {};
}}
.stDateInput input {{
    background: {};
    border: 1px solid {};
    color: {};
    font-size: {}px;
    padding: {}px;
}}
.stDateInput input:focus {{
    border-color: {};
}}
{}",
            self.root().style_width(),
            self.background_color.to_hex(),
            self.border_color.to_hex(),
            self.text_style.color.to_hex(),
            self.text_style.size,
            self.padding,
            self.focus_border_color.to_hex(),
            self.label.to_css(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date_picker::PickedDate;
    use canopy_core::{DrawCommand, MouseButton, RecordingCanvas};
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq)]
    struct Report {
        id: String,
        form_id: String,
        value: Vec<String>,
        source: Source,
    }

    /// Store that remembers the last value per id and every report.
    #[derive(Default)]
    struct FakeStore {
        values: HashMap<String, Vec<String>>,
        reports: Vec<Report>,
    }

    impl FakeStore {
        fn with_value(id: &str, value: &[&str]) -> Self {
            let mut store = Self::default();
            store.values.insert(
                id.to_string(),
                value.iter().map(|s| (*s).to_string()).collect(),
            );
            store
        }
    }

    impl WidgetStore for FakeStore {
        fn string_array_value(&self, id: &str) -> Option<&[String]> {
            self.values.get(id).map(Vec::as_slice)
        }

        fn set_string_array_value(
            &mut self,
            widget: WidgetInfo<'_>,
            value: Vec<String>,
            source: Source,
        ) {
            self.reports.push(Report {
                id: widget.id.to_string(),
                form_id: widget.form_id.to_string(),
                value: value.clone(),
                source,
            });
            self.values.insert(widget.id.to_string(), value);
        }
    }

    #[derive(Default)]
    struct RecordingPicker {
        rendered: Vec<PickerProps>,
    }

    impl DatePicker for RecordingPicker {
        fn render(&mut self, props: &PickerProps) {
            self.rendered.push(props.clone());
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn element() -> DateInputElement {
        DateInputElement::new("date", "Label").default_value(["1970/01/01"])
    }

    fn mount(element: DateInputElement, props: DateInputProps) -> (DateInput, FakeStore) {
        let mut store = FakeStore::default();
        let widget = DateInput::mount(element, props, &mut store);
        (widget, store)
    }

    // =========================================================================
    // Mount Tests
    // =========================================================================

    #[test]
    fn test_mount_reports_default_once_not_from_ui() {
        let (widget, store) = mount(element(), DateInputProps::default());
        assert_eq!(
            store.reports,
            vec![Report {
                id: "date".into(),
                form_id: String::new(),
                value: vec!["1970/01/01".into()],
                source: Source { from_ui: false },
            }]
        );
        assert_eq!(widget.values(), &[ymd(1970, 1, 1)]);
        assert_eq!(widget.phase(), DateInputPhase::Initialized);
    }

    #[test]
    fn test_mount_prefers_store_value_over_default() {
        let mut store = FakeStore::with_value("date", &["2021/05/04"]);
        let widget = DateInput::mount(element(), DateInputProps::default(), &mut store);
        assert_eq!(widget.values(), &[ymd(2021, 5, 4)]);
        assert_eq!(store.reports.len(), 1);
        assert_eq!(store.reports[0].value, vec!["2021/05/04".to_string()]);
    }

    #[test]
    fn test_mount_empty_default() {
        let (widget, store) = mount(
            DateInputElement::new("date", "Label"),
            DateInputProps::default(),
        );
        assert!(widget.values().is_empty());
        assert_eq!(store.reports[0].value, Vec::<String>::new());
        assert_eq!(widget.picker_props().value, Vec::<NaiveDate>::new());
    }

    #[test]
    fn test_mount_drops_malformed_default_entries() {
        let (widget, store) = mount(
            DateInputElement::new("date", "Label").default_value(["garbage", "2020/02/06"]),
            DateInputProps::default(),
        );
        assert_eq!(widget.values(), &[ymd(2020, 2, 6)]);
        assert_eq!(store.reports[0].value, vec!["2020/02/06".to_string()]);
    }

    #[test]
    fn test_mount_normalizes_unpadded_default() {
        let (_, store) = mount(
            DateInputElement::new("date", "Label").default_value(["1970/1/1"]),
            DateInputProps::default(),
        );
        assert_eq!(store.reports[0].value, vec!["1970/01/01".to_string()]);
    }

    #[test]
    fn test_mount_limits_store_value_to_two_dates() {
        let mut store =
            FakeStore::with_value("date", &["2020/01/01", "2020/01/02", "2020/01/03"]);
        let widget = DateInput::mount(element(), DateInputProps::default(), &mut store);
        assert_eq!(widget.values().len(), 2);
        assert!(widget.verify().is_valid());
    }

    #[test]
    fn test_mount_in_form_reports_form_id() {
        let (_, store) = mount(element().in_form("form"), DateInputProps::default());
        assert_eq!(store.reports[0].form_id, "form");
    }

    // =========================================================================
    // Bounds Tests
    // =========================================================================

    #[test]
    fn test_min_without_max() {
        let (widget, _) = mount(element().min("1970/1/1"), DateInputProps::default());
        let props = widget.picker_props();
        assert_eq!(props.min_date, ymd(1970, 1, 1));
        assert_eq!(props.max_date, None);
    }

    #[test]
    fn test_max_date() {
        let (widget, _) = mount(element().max("2030/02/06"), DateInputProps::default());
        assert_eq!(widget.picker_props().max_date, Some(ymd(2030, 2, 6)));
    }

    #[test]
    fn test_year_one_bounds_are_not_shifted() {
        let (widget, _) = mount(
            element().min("0001/01/01").max("0001/01/01"),
            DateInputProps::default(),
        );
        assert_eq!(widget.min_date(), ymd(1, 1, 1));
        assert_eq!(widget.max_date(), Some(ymd(1, 1, 1)));
    }

    #[test]
    fn test_missing_or_malformed_min_falls_back() {
        let (absent, _) = mount(element(), DateInputProps::default());
        assert_eq!(absent.min_date(), ymd(1970, 1, 1));

        let (malformed, _) = mount(element().min("01/02"), DateInputProps::default());
        assert_eq!(malformed.min_date(), ymd(1970, 1, 1));

        let (empty, _) = mount(element().min(""), DateInputProps::default());
        assert_eq!(empty.min_date(), ymd(1970, 1, 1));
    }

    #[test]
    fn test_malformed_max_is_unbounded() {
        let (widget, _) = mount(element().max("2030/13/01"), DateInputProps::default());
        assert_eq!(widget.max_date(), None);
    }

    // =========================================================================
    // Picker Props Tests
    // =========================================================================

    #[test]
    fn test_picker_props_pass_through() {
        let (widget, _) = mount(element(), DateInputProps::default().disabled(true));
        let props = widget.picker_props();
        assert!(props.disabled);
        assert_eq!(props.format_string, "yyyy/MM/dd");
        assert!(!props.range);
        assert_eq!(props.value, vec![ymd(1970, 1, 1)]);
    }

    #[test]
    fn test_picker_props_carry_bounds() {
        let (widget, _) = mount(
            element().min("2000/01/01").max("2000/12/31"),
            DateInputProps::default(),
        );
        let props = widget.picker_props();
        assert_eq!(props.min_date, ymd(2000, 1, 1));
        assert_eq!(props.max_date, Some(ymd(2000, 12, 31)));
        assert_eq!(props.format_string, PICKER_FORMAT_STRING);
    }

    #[test]
    fn test_range_mode_passes_both_dates() {
        let (widget, _) = mount(
            DateInputElement::new("date", "Label")
                .range(true)
                .default_value(["2020/01/01", "2020/01/31"]),
            DateInputProps::default(),
        );
        let props = widget.picker_props();
        assert!(props.range);
        assert_eq!(props.value, vec![ymd(2020, 1, 1), ymd(2020, 1, 31)]);
        assert_eq!(widget.display_text(), "2020/01/01 - 2020/01/31");
    }

    #[test]
    fn test_render_hands_props_to_picker() {
        let (widget, _) = mount(element(), DateInputProps::default().width(300.0));
        let mut picker = RecordingPicker::default();
        let root = widget.render(&mut picker);
        assert_eq!(picker.rendered, vec![widget.picker_props()]);
        assert!(root.has_class("stDateInput"));
        assert_eq!(root.width, 300.0);
    }

    // =========================================================================
    // Root Element Tests
    // =========================================================================

    #[test]
    fn test_root_class_and_width() {
        let (widget, _) = mount(element(), DateInputProps::default().width(120.0));
        let root = widget.root();
        assert!(root.has_class(CLASS_TOKEN));
        assert!(!root.has_class("stDate"));
        assert_eq!(root.width, 120.0);
        assert_eq!(root.style_width(), "120px");
    }

    #[test]
    fn test_root_auto_width() {
        let (widget, _) = mount(element(), DateInputProps::default());
        assert_eq!(widget.root().width, 0.0);
        assert_eq!(widget.root().style_width(), "auto");
    }

    // =========================================================================
    // Change Tests
    // =========================================================================

    #[test]
    fn test_change_updates_picker_and_store() {
        let (mut widget, mut store) = mount(element(), DateInputProps::default());
        let msg = widget.handle_change(DatePickerChange::single(ymd(2020, 2, 6)), &mut store);

        assert_eq!(
            msg,
            Some(DateInputChanged {
                id: "date".into(),
                values: vec!["2020/02/06".into()],
            })
        );
        assert_eq!(widget.picker_props().value, vec![ymd(2020, 2, 6)]);
        assert_eq!(store.reports.len(), 2);
        assert_eq!(store.reports[1].value, vec!["2020/02/06".to_string()]);
        assert_eq!(store.reports[1].source, Source { from_ui: true });
        assert_eq!(widget.phase(), DateInputPhase::Interacting);
    }

    #[test]
    fn test_cleared_change_stores_empty() {
        let (mut widget, mut store) = mount(element(), DateInputProps::default());
        widget.handle_change(DatePickerChange::cleared(), &mut store);
        assert!(widget.values().is_empty());
        assert_eq!(store.reports[1].value, Vec::<String>::new());
        assert_eq!(store.reports[1].source, Source::UI);
    }

    #[test]
    fn test_range_change_stores_both_ends() {
        let (mut widget, mut store) = mount(element().range(true), DateInputProps::default());
        widget.handle_change(
            DatePickerChange::range([ymd(2020, 3, 1), ymd(2020, 3, 9)]),
            &mut store,
        );
        assert_eq!(
            store.reports[1].value,
            vec!["2020/03/01".to_string(), "2020/03/09".to_string()]
        );
    }

    #[test]
    fn test_oversized_range_change_is_truncated() {
        let (mut widget, mut store) = mount(element().range(true), DateInputProps::default());
        let change = DatePickerChange {
            date: PickedDate::Range(vec![ymd(2020, 1, 1), ymd(2020, 1, 2), ymd(2020, 1, 3)]),
        };
        widget.handle_change(change, &mut store);
        assert_eq!(widget.values(), &[ymd(2020, 1, 1), ymd(2020, 1, 2)]);
    }

    #[test]
    fn test_disabled_ignores_change() {
        let (mut widget, mut store) = mount(element(), DateInputProps::default().disabled(true));
        let msg = widget.handle_change(DatePickerChange::single(ymd(2020, 2, 6)), &mut store);
        assert!(msg.is_none());
        assert_eq!(store.reports.len(), 1);
        assert_eq!(widget.values(), &[ymd(1970, 1, 1)]);
    }

    #[test]
    fn test_reset_to_default() {
        let (mut widget, mut store) = mount(element(), DateInputProps::default());
        widget.handle_change(DatePickerChange::single(ymd(2020, 2, 6)), &mut store);
        let msg = widget.reset_to_default(&mut store);
        assert_eq!(msg.values, vec!["1970/01/01".to_string()]);
        assert_eq!(widget.values(), &[ymd(1970, 1, 1)]);
        assert_eq!(store.reports[2].source, Source::UI);
    }

    #[test]
    fn test_backend_value_is_not_from_ui() {
        let (mut widget, mut store) = mount(element(), DateInputProps::default());
        widget.apply_backend_value(&["2022/12/25".to_string()], &mut store);
        assert_eq!(widget.values(), &[ymd(2022, 12, 25)]);
        assert_eq!(store.reports[1].value, vec!["2022/12/25".to_string()]);
        assert_eq!(store.reports[1].source, Source::MOUNT);
        assert_eq!(widget.phase(), DateInputPhase::Initialized);
    }

    // =========================================================================
    // Definition Tests
    // =========================================================================

    #[test]
    fn test_element_from_json_defaults_missing_fields() {
        let element = DateInputElement::from_json(r#"{"id": "d", "label": "When"}"#)
            .expect("valid definition");
        assert_eq!(element, DateInputElement::new("d", "When"));
        assert!(!element.widget_info().is_in_form());
    }

    #[test]
    fn test_element_from_yaml() {
        let yaml = "id: d\nlabel: When\ndefault: [\"2020/01/01\", \"2020/01/31\"]\nis_range: true\nform_id: f\nmax: 2030/02/06\n";
        let element = DateInputElement::from_yaml(yaml).expect("valid definition");
        assert!(element.is_range);
        assert_eq!(element.default.len(), 2);
        assert_eq!(element.max.as_deref(), Some("2030/02/06"));
        assert_eq!(element.widget_info(), WidgetInfo::new("d").in_form("f"));
    }

    #[test]
    fn test_element_validation_errors() {
        assert!(matches!(
            DateInputElement::from_json(r#"{"label": "x"}"#),
            Err(DefinitionError::MissingId)
        ));
        assert!(matches!(
            DateInputElement::from_json(
                r#"{"id": "d", "default": ["2020/01/01", "2020/01/02", "2020/01/03"]}"#
            ),
            Err(DefinitionError::TooManyDefaults { count: 3, .. })
        ));
        assert!(matches!(
            DateInputElement::from_json("[1, 2]"),
            Err(DefinitionError::Json(_))
        ));
    }

    // =========================================================================
    // Widget Trait Tests
    // =========================================================================

    #[test]
    fn test_measure_fixed_width() {
        let (widget, _) = mount(element(), DateInputProps::default().width(250.0));
        let size = widget.measure(Constraints::loose(Size::new(1000.0, 1000.0)));
        assert_eq!(size.width, 250.0);
        assert!(size.height > widget.label.line_height());
    }

    #[test]
    fn test_measure_auto_width() {
        let (widget, _) = mount(element(), DateInputProps::default());
        let size = widget.measure(Constraints::loose(Size::new(1000.0, 1000.0)));
        assert_eq!(size.width, MIN_FIELD_WIDTH);

        let narrow = widget.measure(Constraints::loose(Size::new(100.0, 1000.0)));
        assert_eq!(narrow.width, 100.0);
    }

    #[test]
    fn test_paint_draws_label_field_and_value() {
        let (mut widget, _) = mount(element(), DateInputProps::default());
        widget.layout(Rect::new(0.0, 0.0, 200.0, 60.0));

        let mut canvas = RecordingCanvas::new();
        widget.paint(&mut canvas);

        let texts: Vec<&str> = canvas.texts().collect();
        assert_eq!(texts, vec!["Label", "1970/01/01"]);
        assert!(matches!(canvas.commands()[1], DrawCommand::Rect { .. }));
        assert!(matches!(canvas.commands()[2], DrawCommand::StrokeRect { .. }));
    }

    #[test]
    fn test_paint_placeholder_when_empty() {
        let (mut widget, _) = mount(
            DateInputElement::new("date", "Label"),
            DateInputProps::default(),
        );
        widget.layout(Rect::new(0.0, 0.0, 200.0, 60.0));
        let mut canvas = RecordingCanvas::new();
        widget.paint(&mut canvas);
        assert_eq!(canvas.texts().last(), Some("YYYY/MM/DD"));
    }

    #[test]
    fn test_label_painted_verbatim() {
        let (mut widget, _) = mount(
            DateInputElement::new("date", "*not* <markdown>"),
            DateInputProps::default(),
        );
        widget.layout(Rect::new(0.0, 0.0, 200.0, 60.0));
        let mut canvas = RecordingCanvas::new();
        widget.paint(&mut canvas);
        assert_eq!(canvas.texts().next(), Some("*not* <markdown>"));
    }

    #[test]
    fn test_focus_events() {
        let (mut widget, _) = mount(element(), DateInputProps::default());
        widget.layout(Rect::new(0.0, 0.0, 200.0, 60.0));

        let inside = widget.field_bounds.origin();
        let click = Event::MouseDown {
            position: Point::new(inside.x + 1.0, inside.y + 1.0),
            button: MouseButton::Left,
        };
        assert!(widget.event(&click).is_none());
        assert!(widget.is_focused());

        widget.event(&Event::KeyDown { key: Key::Escape });
        assert!(!widget.is_focused());

        widget.event(&Event::FocusIn);
        assert!(widget.is_focused());
        widget.event(&Event::MouseDown {
            position: Point::new(500.0, 500.0),
            button: MouseButton::Left,
        });
        assert!(!widget.is_focused());
    }

    #[test]
    fn test_disabled_ignores_events() {
        let (mut widget, _) = mount(element(), DateInputProps::default().disabled(true));
        widget.event(&Event::FocusIn);
        assert!(!widget.is_focused());
        assert!(!widget.is_interactive());
        assert!(!widget.is_focusable());
    }

    #[test]
    fn test_accessibility() {
        let (widget, _) = mount(element(), DateInputProps::default());
        assert_eq!(widget.accessible_role(), AccessibleRole::DatePicker);
        assert_eq!(widget.accessible_name(), Some("Label"));
        assert_eq!(widget.test_id(), Some("stDateInput"));
        assert_eq!(Widget::type_id(&widget), TypeId::of::<DateInput>());
    }

    // =========================================================================
    // Brick Tests
    // =========================================================================

    #[test]
    fn test_verify_passes_for_labelled_input() {
        let (widget, _) = mount(element(), DateInputProps::default());
        let verification = widget.verify();
        assert!(verification.is_valid(), "{:?}", verification.failed);
        assert_eq!(verification.passed.len(), widget.assertions().len());
        assert!(widget.can_render());
    }

    #[test]
    fn test_verify_fails_without_label() {
        let (widget, _) = mount(DateInputElement::new("date", ""), DateInputProps::default());
        assert!(!widget.can_render());
    }

    #[test]
    fn test_to_html() {
        let (widget, _) = mount(
            element().max("2030/02/06").help("Pick a day"),
            DateInputProps::default().width(200.0),
        );
        let html = widget.to_html();
        assert!(html.starts_with(r#"<div class="row-widget stDateInput" style="width: 200px""#));
        assert!(html.contains(r#"data-testid="stDateInput""#));
        assert!(html.contains(r#"<label class="stWidgetLabel" title="Pick a day">Label</label>"#));
        assert!(html.contains(r#"value="1970/01/01""#));
        assert!(html.contains(r#"min="1970/01/01" max="2030/02/06""#));
        assert!(html.contains(r#"data-format="yyyy/MM/dd""#));
        assert!(!html.contains("disabled"));
    }

    #[test]
    fn test_to_html_escapes_label_and_marks_disabled() {
        let (widget, _) = mount(
            DateInputElement::new("date", "<b>Start</b>"),
            DateInputProps::default().disabled(true),
        );
        let html = widget.to_html();
        assert!(html.contains("&lt;b&gt;Start&lt;/b&gt;"));
        assert!(html.contains(" disabled>"));
        assert!(html.contains(r#"style="width: auto""#));
    }

    #[test]
    fn test_to_css() {
        let (widget, _) = mount(element(), DateInputProps::default());
        let css = widget.to_css();
        assert!(css.starts_with(".stDateInput {"));
        assert!(css.contains("width: auto;"));
        assert!(css.contains(".stWidgetLabel"));
    }
}
