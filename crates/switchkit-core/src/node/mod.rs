pub mod label;
pub use label::{InvertedLabel, Label};

pub mod toggle_switch;
pub use toggle_switch::ToggleSwitchView;
