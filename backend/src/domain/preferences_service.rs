use anyhow::Result;
use log::info;

use crate::storage::json::{PreferencesRepository, PreferencesStorage};

/// Service for app-wide flags such as onboarding
#[derive(Clone)]
pub struct PreferencesService {
    repository: PreferencesRepository,
}

impl PreferencesService {
    pub fn new(repository: PreferencesRepository) -> Self {
        Self { repository }
    }

    /// Whether the onboarding walkthrough should be skipped
    pub fn has_seen_onboarding(&self) -> Result<bool> {
        Ok(self.repository.get_preferences()?.has_seen_onboarding)
    }

    /// Record that the user finished or dismissed onboarding
    pub fn mark_onboarding_seen(&self) -> Result<()> {
        if self.has_seen_onboarding()? {
            return Ok(());
        }
        info!("Onboarding completed");
        self.repository.set_has_seen_onboarding(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;

    #[test]
    fn test_onboarding_flag_round_trip() {
        let env = TestEnvironment::new().unwrap();
        let service = PreferencesService::new(PreferencesRepository::new(env.connection.clone()));

        assert!(!service.has_seen_onboarding().unwrap());
        service.mark_onboarding_seen().unwrap();
        assert!(service.has_seen_onboarding().unwrap());

        // Marking twice is harmless
        service.mark_onboarding_seen().unwrap();

        let restarted = PreferencesService::new(PreferencesRepository::new(env.connection.clone()));
        assert!(restarted.has_seen_onboarding().unwrap());
    }
}
