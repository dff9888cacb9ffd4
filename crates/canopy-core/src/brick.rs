//! Brick architecture: verifiable assertions.
//!
//! Every widget is also a `Brick`. Before a widget is painted its assertions
//! are verified; a widget whose verification fails must not be rendered.
//! Bricks also produce the HTML/CSS used by web render targets.

use std::time::Duration;

/// Brick assertion that must be verified at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum BrickAssertion {
    /// Text content must be visible (non-empty)
    TextVisible,

    /// WCAG 2.1 contrast ratio requirement (4.5:1 for normal text)
    ContrastRatio(f32),

    /// Element must be present in the rendered output
    ElementPresent(&'static str),

    /// Widget-specific assertion
    Custom {
        /// Assertion name for error reporting
        name: &'static str,
    },
}

impl BrickAssertion {
    /// Create an element presence assertion
    #[must_use]
    pub const fn element_present(selector: &'static str) -> Self {
        Self::ElementPresent(selector)
    }

    /// Create a named widget-specific assertion
    #[must_use]
    pub const fn custom(name: &'static str) -> Self {
        Self::Custom { name }
    }
}

/// Result of verifying brick assertions
#[derive(Debug, Clone, Default)]
pub struct BrickVerification {
    /// All assertions that passed
    pub passed: Vec<BrickAssertion>,
    /// All assertions that failed with reasons
    pub failed: Vec<(BrickAssertion, String)>,
    /// Time taken to verify
    pub verification_time: Duration,
}

impl BrickVerification {
    /// Record the outcome of one assertion.
    pub fn check(&mut self, assertion: BrickAssertion, ok: bool, reason: impl Into<String>) {
        if ok {
            self.passed.push(assertion);
        } else {
            self.failed.push((assertion, reason.into()));
        }
    }

    /// Check if all assertions passed
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Core Brick trait.
///
/// `Widget` requires `Brick`, so every widget has verifiable assertions
/// and a deterministic HTML/CSS rendering.
pub trait Brick: Send + Sync {
    /// Get the brick's unique type name
    fn brick_name(&self) -> &'static str;

    /// Get all assertions for this brick
    fn assertions(&self) -> &[BrickAssertion];

    /// Verify all assertions against current state
    fn verify(&self) -> BrickVerification;

    /// Generate HTML for this brick. Same state gives the same output.
    fn to_html(&self) -> String;

    /// Generate CSS for this brick, scoped to its class names.
    fn to_css(&self) -> String;

    /// Check if this brick can be rendered (all assertions pass)
    fn can_render(&self) -> bool {
        self.verify().is_valid()
    }
}
