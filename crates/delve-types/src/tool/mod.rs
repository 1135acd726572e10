mod kind;

pub use kind::ToolKind;
