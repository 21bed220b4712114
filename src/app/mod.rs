// Application layer - Use case interactors

pub mod container;
pub mod player_interactor;
pub mod playlist_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use player_interactor::PlayerInteractor;
pub use playlist_interactor::PlaylistInteractor;
