pub mod collector;
pub mod scanner;
pub mod sorter;
pub mod tagger;
