//! Table readers. Each produces ordered `Row`s (label, value1, value2).

pub mod delimited;
