//! Session settings
//!
//! Read from the page URL query string (`?seed=42&volume=0.3&quality=low`).
//! Nothing is persisted between sessions.

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
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

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Number of stars in the sky
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 40,
            QualityPreset::High => 120,
        }
    }

    /// Number of drifting clouds
    pub fn cloud_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 3,
            QualityPreset::High => 6,
        }
    }
}

/// Per-session options
#[derive(Debug, Clone)]
pub struct Settings {
    /// Fixed run seed (wall clock when absent)
    pub seed: Option<u64>,
    /// Scenery density
    pub quality: QualityPreset,
    /// Show FPS counter
    pub show_fps: bool,

    // === Audio ===
    /// Background track location
    pub music_src: String,
    /// Volume the fade-in settles at (0.0 - 1.0)
    pub music_volume: f32,
    /// Volume added per fade interval
    pub music_fade_step: f32,
    /// Fade interval in milliseconds
    pub music_fade_interval_ms: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            quality: QualityPreset::Medium,
            show_fps: false,

            music_src: "assets/bg-music.mp3".to_string(),
            music_volume: 0.5,
            music_fade_step: 0.01,
            music_fade_interval_ms: 100,
        }
    }
}

impl Settings {
    /// Build settings from a URL query string.
    ///
    /// Unknown keys are ignored; malformed values are logged and skipped.
    pub fn from_query(query: &str) -> Self {
        let mut settings = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "seed" => match value.parse::<u64>() {
                    Ok(seed) => settings.seed = Some(seed),
                    Err(_) => log::warn!("Ignoring invalid seed: {:?}", value),
                },
                "volume" => match value.parse::<f32>() {
                    Ok(vol) if vol.is_finite() => settings.music_volume = vol.clamp(0.0, 1.0),
                    _ => log::warn!("Ignoring invalid volume: {:?}", value),
                },
                "quality" => match QualityPreset::from_str(value) {
                    Some(preset) => settings.quality = preset,
                    None => log::warn!("Ignoring unknown quality preset: {:?}", value),
                },
                "fps" => settings.show_fps = matches!(value, "" | "1" | "true" | "on"),
                _ => {}
            }
        }

        settings
    }

    /// Load settings from the page URL (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();

        let settings = Self::from_query(&search);
        log::info!(
            "Settings: quality={} volume={:.2}",
            settings.quality.as_str(),
            settings.music_volume
        );
        settings
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
