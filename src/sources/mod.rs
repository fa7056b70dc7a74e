pub mod history;
pub mod locator;
pub mod parser;
