//! Label shown above form widgets.

use canopy_core::{
    widget::{AccessibleRole, FontWeight, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickVerification, Canvas, Color, Constraints, Event, Rect, Size,
    TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Duration;

/// Text label for a form widget.
///
/// The text is displayed verbatim: it is never interpreted as markup, and
/// HTML output escapes it so the rendered text content equals the label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WidgetLabel {
    /// Label text
    text: String,
    /// Tooltip text
    help: Option<String>,
    /// Dimmed when the owning widget is disabled
    disabled: bool,
    /// Text color
    color: Color,
    /// Font size in pixels
    font_size: f32,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl WidgetLabel {
    /// Create a new label.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            help: None,
            disabled: false,
            color: Color::rgb(0.19, 0.2, 0.25),
            font_size: 14.0,
            bounds: Rect::default(),
        }
    }

    /// Set tooltip text.
    #[must_use]
    pub fn help(mut self, help: Option<String>) -> Self {
        self.help = help;
        self
    }

    /// Set disabled (dimmed) state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set text color.
    #[must_use]
    pub const fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Get the label text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the tooltip text.
    #[must_use]
    pub fn get_help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Get the effective text color.
    #[must_use]
    pub fn text_color(&self) -> Color {
        if self.disabled {
            Color::new(self.color.r, self.color.g, self.color.b, 0.4)
        } else {
            self.color
        }
    }

    /// Height of one line of label text.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        if self.text.is_empty() {
            0.0
        } else {
            self.font_size * 1.4
        }
    }

    fn text_style(&self) -> TextStyle {
        TextStyle {
            size: self.font_size,
            color: self.text_color(),
            weight: FontWeight::Normal,
        }
    }
}

impl Widget for WidgetLabel {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        // ~0.6 em per character
        let width = self.text.chars().count() as f32 * self.font_size * 0.6;
        constraints.constrain(Size::new(width, self.line_height()))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if self.text.is_empty() {
            return;
        }
        canvas.draw_text(&self.text, self.bounds.origin(), &self.text_style());
    }

    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.text)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Label
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for WidgetLabel {
    fn brick_name(&self) -> &'static str {
        "WidgetLabel"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        &[BrickAssertion::TextVisible]
    }

    fn verify(&self) -> BrickVerification {
        let mut verification = BrickVerification {
            verification_time: Duration::from_micros(5),
            ..BrickVerification::default()
        };
        verification.check(
            BrickAssertion::TextVisible,
            !self.text.is_empty(),
            "Label text is empty",
        );
        verification
    }

    fn to_html(&self) -> String {
        let title = self
            .help
            .as_deref()
            .map(|help| format!(r#" title="{}""#, escape_html(help)))
            .unwrap_or_default();
        format!(
            r#"<label class="stWidgetLabel"{title}>{}</label>"#,
            escape_html(&self.text)
        )
    }

    fn to_css(&self) -> String {
        format!(
            r".stWidgetLabel {{
    color: {};
    font-size: {}px;
    margin-bottom: 0.25rem;
}}",
            self.text_color().to_hex(),
            self.font_size
        )
    }
}

/// Escape text for use in HTML content and quoted attributes.
pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::{DrawCommand, Point, RecordingCanvas};

    #[test]
    fn test_label_new() {
        let label = WidgetLabel::new("Label");
        assert_eq!(label.text(), "Label");
        assert_eq!(label.get_help(), None);
        assert_eq!(label.accessible_name(), Some("Label"));
        assert_eq!(label.accessible_role(), AccessibleRole::Label);
    }

    #[test]
    fn test_label_paint_draws_text_verbatim() {
        let mut label = WidgetLabel::new("**not bold** <b>");
        label.layout(Rect::new(5.0, 6.0, 200.0, 20.0));

        let mut canvas = RecordingCanvas::new();
        label.paint(&mut canvas);

        match &canvas.commands()[0] {
            DrawCommand::Text {
                content, position, ..
            } => {
                assert_eq!(content, "**not bold** <b>");
                assert_eq!(*position, Point::new(5.0, 6.0));
            }
            other => panic!("Expected Text command, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_label_paints_nothing_and_takes_no_height() {
        let label = WidgetLabel::new("");
        let mut canvas = RecordingCanvas::new();
        label.paint(&mut canvas);
        assert!(canvas.is_empty());
        assert_eq!(label.line_height(), 0.0);
        assert!(!label.verify().is_valid());
    }

    #[test]
    fn test_label_disabled_is_dimmed() {
        let label = WidgetLabel::new("x").disabled(true);
        assert!(label.text_color().a < 1.0);
    }

    #[test]
    fn test_label_html_escapes_text_and_help() {
        let label = WidgetLabel::new("a < b & \"c\"").help(Some("it's".into()));
        assert_eq!(
            label.to_html(),
            r#"<label class="stWidgetLabel" title="it&#39;s">a &lt; b &amp; &quot;c&quot;</label>"#
        );
    }

    #[test]
    fn test_label_css_uses_color() {
        let label = WidgetLabel::new("x").color(Color::BLACK);
        assert!(label.to_css().contains("color: #000000"));
    }

    #[test]
    fn test_label_measure() {
        let label = WidgetLabel::new("Hello");
        let size = label.measure(Constraints::loose(Size::new(1000.0, 100.0)));
        assert!(size.width > 0.0);
        assert!(size.height > 0.0);
    }
}
