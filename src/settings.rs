//! Game settings and preferences
//!
//! Cosmetic only; gameplay constants live in `consts`. Loaded from defaults,
//! then LocalStorage, then URL query overrides.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Highlight hazards the avatar has touched
    pub hazard_flash: bool,
    /// Reduced motion (steady highlight instead of flashing)
    pub reduced_motion: bool,
    /// High contrast palette
    pub high_contrast: bool,
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hazard_flash: true,
            reduced_motion: false,
            high_contrast: false,
            show_fps: false,
        }
    }
}

/// Parse an on/off query value
fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

impl Settings {
    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "edge_runner_settings";

    /// Parse settings JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }

    /// Apply `key=value` overrides from a URL query string (leading `?` optional).
    ///
    /// Unknown keys and unparsable values are ignored. Returns how many
    /// overrides were applied.
    pub fn apply_query(&mut self, query: &str) -> usize {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut applied = 0;

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, "1"));
            let field = match key {
                "flash" => &mut self.hazard_flash,
                "contrast" => &mut self.high_contrast,
                "fps" => &mut self.show_fps,
                "motion" => {
                    match value {
                        "reduced" => self.reduced_motion = true,
                        "full" => self.reduced_motion = false,
                        _ => continue,
                    }
                    applied += 1;
                    continue;
                }
                _ => continue,
            };
            if let Some(flag) = parse_flag(value) {
                *field = flag;
                applied += 1;
            }
        }

        applied
    }

    /// Stored JSON (if any and valid) with URL overrides on top.
    ///
    /// Returns the settings and how many overrides the query applied; a
    /// non-zero count means the result differs from what is stored.
    pub fn resolve(stored: Option<&str>, query: &str) -> (Self, usize) {
        let mut settings = stored.and_then(Self::from_json).unwrap_or_default();
        let applied = settings.apply_query(query);
        (settings, applied)
    }

    /// Whether collided hazards should blink
    pub fn effective_flash(&self) -> bool {
        self.hazard_flash && !self.reduced_motion
    }

    /// Load settings from LocalStorage and the page URL (WASM only).
    ///
    /// URL overrides are written back so they stick on the next visit.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let window = web_sys::window();
        let stored = window
            .as_ref()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .and_then(|s| s.get_item(Self::STORAGE_KEY).ok().flatten());
        let query = window
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();

        match stored {
            Some(_) => log::info!("Loaded settings from LocalStorage"),
            None => log::info!("Using default settings"),
        }
        let (settings, applied) = Self::resolve(stored.as_deref(), &query);
        if applied > 0 {
            log::info!("Applied {} settings override(s) from URL", applied);
            settings.save();
        }

        settings
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
