//! Form widget implementations for Canopy dashboards.

pub mod date_codec;
pub mod date_input;
pub mod date_picker;
pub mod error;
pub mod label;

pub use date_codec::{decode, encode, PICKER_FORMAT_STRING};
pub use date_input::{
    DateInput, DateInputChanged, DateInputElement, DateInputPhase, DateInputProps, RootElement,
};
pub use date_picker::{DatePicker, DatePickerChange, PickedDate, PickerProps};
pub use error::{DateParseError, DefinitionError};
pub use label::WidgetLabel;
