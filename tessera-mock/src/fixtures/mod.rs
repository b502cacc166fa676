pub mod counts;
pub mod history;
