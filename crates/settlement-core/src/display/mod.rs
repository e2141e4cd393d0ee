pub mod currency;
pub mod statement;
pub mod words;
