//! Oracle implementations backed by loaded content.
mod map;

pub use map::BoardMap;
