use std::sync::Arc;

use crate::app::{player_interactor::PlayerInteractor, playlist_interactor::PlaylistInteractor};
use crate::config_initialization::Settings;

pub trait AppContainer: Send + Sync {
    fn playlist_interactor(&self) -> Arc<PlaylistInteractor>;
    fn player_interactor(&self) -> Arc<PlayerInteractor>;
    fn settings(&self) -> &Settings;
}

pub struct DefaultAppContainer {
    playlist_interactor: Arc<PlaylistInteractor>,
    player_interactor: Arc<PlayerInteractor>,
    settings: Settings,
}

impl DefaultAppContainer {
    /// Wire the interactors from resolved settings
    pub fn new(settings: Settings) -> Self {
        let playlist_interactor = Arc::new(PlaylistInteractor::new(settings.watch_base_url.clone()));
        let player_interactor = Arc::new(PlayerInteractor::new(settings.player_settings()));

        Self {
            playlist_interactor,
            player_interactor,
            settings,
        }
    }
}

impl AppContainer for DefaultAppContainer {
    fn playlist_interactor(&self) -> Arc<PlaylistInteractor> {
        Arc::clone(&self.playlist_interactor)
    }

    fn player_interactor(&self) -> Arc<PlayerInteractor> {
        Arc::clone(&self.player_interactor)
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}
