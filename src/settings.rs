//! Presentation settings and preferences
//!
//! Persisted in LocalStorage on the web. None of these touch the simulation;
//! they only decide which effects the Presentation Layer spawns.

use serde::{Deserialize, Serialize};

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    /// Particles spawned per goal burst
    pub fn burst_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 12,
            QualityPreset::Medium => 32,
            QualityPreset::High => 64,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Effects ===
    /// Flash the scorer's side on a goal
    pub goal_flash: bool,
    /// Particle burst where the ball crossed the line
    pub particles: bool,
    /// Camera zoom when a round ends
    pub camera_zoom: bool,

    // === HUD ===
    /// Show the hit counter / speed readout
    pub show_info: bool,

    // === Accessibility ===
    /// Reduced motion (no flashes or zooms)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            goal_flash: true,
            particles: true,
            camera_zoom: true,
            show_info: true,
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;

        // Low preset skips the extra flash pass
        self.goal_flash = preset != QualityPreset::Low;
    }

    /// Settings hotkeys by physical code. Returns true if anything changed.
    ///
    /// `KeyI` toggles the info readout, `KeyM` toggles reduced motion and
    /// `Digit1`..`Digit3` pick the Low/Medium/High preset.
    pub fn handle_key(&mut self, code: &str) -> bool {
        match code {
            "KeyI" => {
                self.show_info = !self.show_info;
                log::info!("Info readout {}", if self.show_info { "on" } else { "off" });
            }
            "KeyM" => {
                self.reduced_motion = !self.reduced_motion;
                log::info!(
                    "Reduced motion {}",
                    if self.reduced_motion { "on" } else { "off" }
                );
            }
            "Digit1" | "Digit2" | "Digit3" => {
                let preset = match code {
                    "Digit1" => QualityPreset::Low,
                    "Digit2" => QualityPreset::Medium,
                    _ => QualityPreset::High,
                };
                if preset == self.quality {
                    return false;
                }
                self.apply_preset(preset);
                log::info!("Quality preset: {}", preset.as_str());
            }
            _ => return false,
        }
        true
    }

    /// Effective goal flash (respects reduced_motion)
    pub fn effective_goal_flash(&self) -> bool {
        self.goal_flash && !self.reduced_motion
    }

    /// Effective camera zoom (respects reduced_motion)
    pub fn effective_camera_zoom(&self) -> bool {
        self.camera_zoom && !self.reduced_motion
    }

    /// Particles per goal burst, 0 when disabled
    pub fn burst_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.burst_particles()
        }
    }

    /// Parse stored JSON, falling back to defaults on any error
    pub fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// LocalStorage key
    pub const STORAGE_KEY: &'static str = "neon_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json_or_default(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match self.to_json() {
                Ok(json) => {
                    let _ = storage.set_item(Self::STORAGE_KEY, &json);
                    log::info!("Settings saved");
                }
                Err(e) => log::warn!("Could not serialize settings: {}", e),
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
