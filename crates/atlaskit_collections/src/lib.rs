pub mod indexed_map;

pub use indexed_map::IndexedMap;
