//! UI primitives shared by the views and the input layer

mod text_input;
mod types;

pub use text_input::TextInput;
pub use types::{Button, Rect};
