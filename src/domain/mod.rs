// Domain layer - Playlist model and the rules that act on it

pub mod errors;
pub mod model;
pub mod rules;
