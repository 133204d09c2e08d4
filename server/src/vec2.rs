pub use skirmish_shared::vec2::*;
