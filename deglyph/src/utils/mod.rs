// deglyph/src/utils/mod.rs

pub mod page_files;
