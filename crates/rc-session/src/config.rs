//! Session configuration and persisted user settings.

use serde::{Deserialize, Serialize};

use rc_core::{RcResult, RollCallError};

/// Construction-time configuration for a [`crate::Session`].
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// RNG seed for reproducible draws. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Locale tag handed to the speech engine.
    pub locale: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: None,
            locale: "zh-CN".to_string(),
        }
    }
}

impl SessionConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the speech locale tag.
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Map a system language string (e.g. `zh_CN.UTF-8`, `en-GB`) to a speech locale.
pub fn locale_for(lang: &str) -> &'static str {
    if lang.to_lowercase().starts_with("zh") {
        "zh-CN"
    } else {
        "en-US"
    }
}

const DEFAULT_SPEECH_RATE: f32 = 1.0;
const MIN_SPEECH_RATE: f32 = 0.1;
const MAX_SPEECH_RATE: f32 = 10.0;

/// User settings persisted between runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Whether selections are spoken aloud.
    pub speech_enabled: bool,
    /// Speech rate multiplier.
    pub speech_rate: f32,
    /// Per-mode tunables.
    pub voice_mode: VoiceModeConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speech_enabled: true,
            speech_rate: DEFAULT_SPEECH_RATE,
            voice_mode: VoiceModeConfig::default(),
        }
    }
}

impl Settings {
    /// Flip speech on or off. Returns the new state.
    pub fn toggle_speech(&mut self) -> bool {
        self.speech_enabled = !self.speech_enabled;
        self.speech_enabled
    }

    /// Set the speech rate (clamped to 0.1-10). NaN resets it to 1.
    pub fn set_speech_rate(&mut self, rate: f32) {
        self.speech_rate = if rate.is_nan() {
            DEFAULT_SPEECH_RATE
        } else {
            rate.clamp(MIN_SPEECH_RATE, MAX_SPEECH_RATE)
        };
    }

    /// Set the pause between sequence calls in seconds (clamped to 1-60).
    pub fn set_sequence_interval(&mut self, seconds: u32) {
        self.voice_mode.sequence.interval = seconds.clamp(1, 60);
    }

    /// Set how many names a quick draw picks (clamped to 1-10).
    pub fn set_quick_count(&mut self, count: usize) {
        self.voice_mode.quick.count = count.clamp(1, 10);
    }

    /// Set the default countdown duration in seconds.
    pub fn set_timer_duration(&mut self, seconds: u32) -> RcResult<()> {
        if seconds < 1 {
            return Err(RollCallError::InvalidDuration);
        }
        self.voice_mode.timer.duration = seconds;
        Ok(())
    }

    /// Pull every value back into the range its setter allows. Applied to
    /// settings read from disk.
    pub fn normalize(&mut self) {
        self.set_speech_rate(self.speech_rate);
        self.set_sequence_interval(self.voice_mode.sequence.interval);
        self.set_quick_count(self.voice_mode.quick.count);
        if self.voice_mode.timer.duration < 1 {
            self.voice_mode.timer = TimerOptions::default();
        }
    }
}

/// Tunables for each roll-call mode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceModeConfig {
    /// Sequence mode options.
    pub sequence: SequenceOptions,
    /// Random mode options.
    pub random: RandomOptions,
    /// Quick-draw options.
    pub quick: QuickOptions,
    /// Countdown options.
    pub timer: TimerOptions,
}

/// Sequence mode options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequenceOptions {
    /// Seconds between the end of one announcement and the next call.
    pub interval: u32,
}

impl Default for SequenceOptions {
    fn default() -> Self {
        Self { interval: 1 }
    }
}

/// Random mode presentation flags. Carried for the renderer, unused by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomOptions {
    /// 3D card flip on reveal.
    #[serde(rename = "enable3d")]
    pub enable_3d: bool,
    /// Particle burst during the suspense phase.
    #[serde(rename = "enableParticles")]
    pub enable_particles: bool,
}

impl Default for RandomOptions {
    fn default() -> Self {
        Self {
            enable_3d: true,
            enable_particles: true,
        }
    }
}

/// Quick-draw options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuickOptions {
    /// Names drawn per quick draw.
    pub count: usize,
}

impl Default for QuickOptions {
    fn default() -> Self {
        Self { count: 3 }
    }
}

/// Countdown options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerOptions {
    /// Default countdown length in seconds.
    pub duration: u32,
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self { duration: 30 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.locale, "zh-CN");
    }

    #[test]
    fn builder_methods() {
        let cfg = SessionConfig::default().with_seed(7).with_locale("en-US");
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.locale, "en-US");
    }

    #[test]
    fn locale_mapping() {
        assert_eq!(locale_for("zh_CN.UTF-8"), "zh-CN");
        assert_eq!(locale_for("ZH-tw"), "zh-CN");
        assert_eq!(locale_for("en_GB.UTF-8"), "en-US");
        assert_eq!(locale_for(""), "en-US");
    }

    #[test]
    fn default_settings() {
        let s = Settings::default();
        assert!(s.speech_enabled);
        assert_eq!(s.speech_rate, 1.0);
        assert_eq!(s.voice_mode.sequence.interval, 1);
        assert_eq!(s.voice_mode.quick.count, 3);
        assert_eq!(s.voice_mode.timer.duration, 30);
        assert!(s.voice_mode.random.enable_3d);
    }

    #[test]
    fn setters_clamp() {
        let mut s = Settings::default();
        s.set_speech_rate(50.0);
        assert_eq!(s.speech_rate, 10.0);
        s.set_sequence_interval(0);
        assert_eq!(s.voice_mode.sequence.interval, 1);
        s.set_quick_count(99);
        assert_eq!(s.voice_mode.quick.count, 10);
        assert_eq!(s.set_timer_duration(0), Err(RollCallError::InvalidDuration));
        assert_eq!(s.voice_mode.timer.duration, 30);
        s.set_timer_duration(90).unwrap();
        assert_eq!(s.voice_mode.timer.duration, 90);
    }

    #[test]
    fn speech_rate_rejects_nan() {
        let mut s = Settings::default();
        s.set_speech_rate(3.0);
        s.set_speech_rate(f32::NAN);
        assert_eq!(s.speech_rate, 1.0);
        s.set_speech_rate(f32::INFINITY);
        assert_eq!(s.speech_rate, 10.0);
        s.set_speech_rate(f32::NEG_INFINITY);
        assert_eq!(s.speech_rate, 0.1);

        s.set_speech_rate(f32::NAN);
        let json = serde_json::to_string(&s).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn normalize_clamps_loaded_values() {
        let mut s: Settings = serde_json::from_str(
            r#"{"speechRate":0,"voiceMode":{"sequence":{"interval":0},"quick":{"count":0},"timer":{"duration":0}}}"#,
        )
        .unwrap();
        s.normalize();
        assert_eq!(s.speech_rate, 0.1);
        assert_eq!(s.voice_mode.sequence.interval, 1);
        assert_eq!(s.voice_mode.quick.count, 1);
        assert_eq!(s.voice_mode.timer.duration, 30);
    }

    #[test]
    fn toggle_speech() {
        let mut s = Settings::default();
        assert!(!s.toggle_speech());
        assert!(s.toggle_speech());
    }

    #[test]
    fn camel_case_on_disk() {
        let json = serde_json::to_string(&Settings::default()).unwrap();
        assert!(json.contains("\"speechEnabled\":true"));
        assert!(json.contains("\"voiceMode\""));
        assert!(json.contains("\"enable3d\":true"));
        assert!(json.contains("\"enableParticles\":true"));
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let s: Settings =
            serde_json::from_str(r#"{"speechRate":1.5,"voiceMode":{"quick":{"count":5}}}"#)
                .unwrap();
        assert!(s.speech_enabled);
        assert_eq!(s.speech_rate, 1.5);
        assert_eq!(s.voice_mode.quick.count, 5);
        assert_eq!(s.voice_mode.timer.duration, 30);
    }
}
