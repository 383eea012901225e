pub mod map;

pub use map::{MapGenerated, RegenerateMap};
