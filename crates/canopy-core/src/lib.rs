//! Core types and traits for the Canopy dashboard widget framework.
//!
//! This crate provides foundational types used by Canopy widgets:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Color representation: [`Color`] with WCAG contrast calculations
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`]
//! - The [`Widget`] and [`Brick`] traits and a [`RecordingCanvas`]
//! - Shared widget values: [`WidgetStateManager`]

mod brick;
mod canvas;
mod color;
mod constraints;
mod event;
mod geometry;
pub mod widget;
pub mod widget_state;

pub use brick::{Brick, BrickAssertion, BrickVerification};
pub use canvas::{DrawCommand, RecordingCanvas};
pub use color::Color;
pub use constraints::Constraints;
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{AccessibleRole, Canvas, FontWeight, LayoutResult, TextStyle, TypeId, Widget};
pub use widget_state::{
    AsWidgetInfo, NoopRerunHandler, RerunHandler, Source, WidgetInfo, WidgetState,
    WidgetStateManager, WidgetStates, WidgetStore, WidgetValue,
};
