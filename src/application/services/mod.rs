// src/application/services/mod.rs
use std::sync::Arc;

use crate::application::{
    commands::grants::{GrantCommandService, GrantSettings},
    ports::{credential::CredentialCodec, replay::ConsumedCredentialStore},
};

pub struct ApplicationServices {
    pub grant_commands: Arc<GrantCommandService>,
}

impl ApplicationServices {
    pub fn new(
        settings: GrantSettings,
        codec: Arc<dyn CredentialCodec>,
        replay_guard: Option<Arc<dyn ConsumedCredentialStore>>,
    ) -> Self {
        let grant_commands = Arc::new(GrantCommandService::new(settings, codec, replay_guard));
        Self { grant_commands }
    }
}
