//! Banner and interstitial ads
//!
//! `AdPresenter` wraps an ad network with the retry/re-arm policy. It owns no
//! timers: when something should happen later it returns the delay and the
//! shell schedules it. Network errors never escape.

use std::time::Duration;

use thiserror::Error;

use crate::consts::{BANNER_MAX_RETRIES, BANNER_RETRY_DELAY, INTERSTITIAL_REARM_DELAY};

#[derive(Debug, Error)]
pub enum AdError {
    #[error("ad network not initialized")]
    NotInitialized,
    #[error("no ad ready")]
    NotReady,
    #[error("ad network error: {0}")]
    Network(String),
}

/// Platform ad SDK
pub trait AdNetwork {
    fn initialize(&mut self) -> Result<(), AdError>;
    fn show_banner(&mut self) -> Result<(), AdError>;
    /// Load the next interstitial so it is ready to show
    fn prepare_interstitial(&mut self) -> Result<(), AdError>;
    fn show_interstitial(&mut self) -> Result<(), AdError>;
}

pub struct AdPresenter<N> {
    network: N,
    /// False off the mobile platform; every call is then a no-op
    enabled: bool,
    initialized: bool,
    banner_visible: bool,
    banner_retries: u32,
}

impl<N: AdNetwork> AdPresenter<N> {
    pub fn new(network: N, enabled: bool) -> Self {
        Self {
            network,
            enabled,
            initialized: false,
            banner_visible: false,
            banner_retries: 0,
        }
    }

    pub fn network(&self) -> &N {
        &self.network
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    /// Initialize the SDK once and prepare the first interstitial
    pub fn initialize(&mut self) {
        if self.initialized || !self.enabled {
            return;
        }
        match self.network.initialize() {
            Ok(()) => {
                self.initialized = true;
                log::info!("Ads initialized");
                self.prepare_interstitial();
            }
            Err(e) => log::warn!("Ad init failed: {e}"),
        }
    }

    /// Show the bottom banner. Returns the delay before the next attempt
    /// when it failed and retries remain.
    pub fn show_banner(&mut self) -> Option<Duration> {
        if !self.enabled || self.banner_visible {
            return None;
        }
        match self.network.show_banner() {
            Ok(()) => {
                self.banner_visible = true;
                None
            }
            Err(e) if self.banner_retries < BANNER_MAX_RETRIES => {
                self.banner_retries += 1;
                log::warn!(
                    "Banner failed ({e}), retry {}/{BANNER_MAX_RETRIES}",
                    self.banner_retries
                );
                Some(BANNER_RETRY_DELAY)
            }
            Err(e) => {
                log::warn!("Banner failed ({e}), giving up");
                None
            }
        }
    }

    pub fn prepare_interstitial(&mut self) {
        if !self.enabled {
            return;
        }
        if let Err(e) = self.network.prepare_interstitial() {
            log::debug!("Interstitial not ready yet: {e}");
        }
    }

    /// Show an interstitial. The next one is always re-armed: immediately on
    /// failure, or after the returned delay on success.
    pub fn show_interstitial(&mut self) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        match self.network.show_interstitial() {
            Ok(()) => Some(INTERSTITIAL_REARM_DELAY),
            Err(e) => {
                log::info!("Could not show interstitial ({e}), preparing for next time");
                self.prepare_interstitial();
                None
            }
        }
    }
}

/// Ad network for platforms without ads
#[derive(Debug, Default)]
pub struct NullAdNetwork;

impl AdNetwork for NullAdNetwork {
    fn initialize(&mut self) -> Result<(), AdError> {
        Ok(())
    }

    fn show_banner(&mut self) -> Result<(), AdError> {
        Ok(())
    }

    fn prepare_interstitial(&mut self) -> Result<(), AdError> {
        Ok(())
    }

    fn show_interstitial(&mut self) -> Result<(), AdError> {
        log::debug!("(interstitial would show here)");
        Ok(())
    }
}

/// Test network that counts calls and fails on demand
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct ScriptedAds {
    pub inits: u32,
    pub banner_attempts: u32,
    pub prepares: u32,
    pub interstitials: u32,
    /// Banner calls fail while this is non-zero (each failure decrements)
    pub banner_failures: u32,
    pub interstitial_fails: bool,
}

#[cfg(test)]
impl AdNetwork for ScriptedAds {
    fn initialize(&mut self) -> Result<(), AdError> {
        self.inits += 1;
        Ok(())
    }

    fn show_banner(&mut self) -> Result<(), AdError> {
        self.banner_attempts += 1;
        if self.banner_failures > 0 {
            self.banner_failures -= 1;
            return Err(AdError::Network("timeout".into()));
        }
        Ok(())
    }

    fn prepare_interstitial(&mut self) -> Result<(), AdError> {
        self.prepares += 1;
        Ok(())
    }

    fn show_interstitial(&mut self) -> Result<(), AdError> {
        self.interstitials += 1;
        if self.interstitial_fails {
            return Err(AdError::NotReady);
        }
        Ok(())
    }
}
