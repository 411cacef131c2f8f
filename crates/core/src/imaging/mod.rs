pub mod domain;
pub mod enhance;
pub mod infrastructure;
