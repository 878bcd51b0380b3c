pub mod help;
pub mod palette;
pub mod picker;
pub mod root;
