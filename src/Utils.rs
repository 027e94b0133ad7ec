//! different utility modules used throughout the project
/// logger setup and saving of trace tables into files
pub mod logger;
/// pretty-printing of rows of text as a table - a thin wrapper around the tabled crate
pub mod table;
/// parse task documents with structure like "title1 key1: value1 key2: value2 title2 key3: value3" into search tasks
pub mod task_parser;
