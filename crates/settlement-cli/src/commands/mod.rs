pub mod settlement;
