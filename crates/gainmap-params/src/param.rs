//! Host-facing volume parameter.
//!
//! The host (or UI) writes a normalized value, the audio thread reads the corresponding gain once per process cycle.
//! [`VolumeParam`] owns that value and does the conversions; it knows nothing about any particular plugin API.
use crate::mapping::{DynMapping, MappingExt};
use crate::text::ParseVolumeError;
use crate::volume::VolumeRange;
use gainmap_utils::AtomicF32;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Identifier under which the volume parameter is registered with the host.
pub const VOLUME_PARAM_ID: &str = "volume";

/// Parameter holding a single normalized value in `0..=1`.
pub trait NormalizedParam: Send + Sync {
    /// Current normalized value.
    fn get_value(&self) -> f32;
    /// Change the normalized value.
    fn set_value(&self, value: f32);
}

/// Static description of a parameter, used by host glue to register it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamInfo {
    /// Stable parameter ID
    pub id: &'static str,
    /// Version of the parameter ID, bumped when its meaning changes
    pub version: u32,
    /// Display name
    pub name: &'static str,
    /// ID of the group the parameter belongs to
    pub group_id: &'static str,
    /// Display name of the group
    pub group_name: &'static str,
    /// Separator between nested group names
    pub group_separator: &'static str,
    /// Smallest normalized increment
    pub step: f32,
    /// Default normalized value
    pub default_value: f32,
}

/// Volume parameter, storing its normalized value in an atomic.
///
/// There is a single writer and a single reader, and the value does not guard any other state, so all accesses use
/// relaxed ordering.
pub struct VolumeParam {
    range: VolumeRange,
    value: AtomicF32,
    changed: AtomicBool,
    default_value: f32,
}

impl fmt::Debug for VolumeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeParam")
            .field("value", &self.get_value())
            .field("text", &self.to_text(crate::text::DEFAULT_MAX_TEXT_LEN))
            .finish_non_exhaustive()
    }
}

impl fmt::Display for VolumeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.range.format_into(f, self.get_value() as f64)
    }
}

impl Default for VolumeParam {
    fn default() -> Self {
        Self::new(VolumeRange::DEFAULT)
    }
}

impl NormalizedParam for VolumeParam {
    fn get_value(&self) -> f32 {
        self.value.load(Self::ORDERING)
    }

    fn set_value(&self, value: f32) {
        if value.is_nan() {
            log::warn!("VolumeParam: ignoring NaN value");
            return;
        }
        self.value.store(value.clamp(0.0, 1.0), Self::ORDERING);
        self.changed.store(true, Self::ORDERING);
    }
}

impl VolumeParam {
    const ORDERING: Ordering = Ordering::Relaxed;
    const STEP: f32 = 1e-7;
    const VERSION: u32 = 1;

    /// Create a new volume parameter over the given range, set to unity gain.
    pub fn new(range: VolumeRange) -> Self {
        let default_value = range.normalize_db(0.0) as f32;
        Self {
            range,
            value: AtomicF32::new(default_value),
            changed: AtomicBool::new(true),
            default_value,
        }
    }

    /// Volume range of this parameter.
    pub fn range(&self) -> &VolumeRange {
        &self.range
    }

    /// Default normalized value (unity gain).
    pub fn default_value(&self) -> f32 {
        self.default_value
    }

    /// Registration info for this parameter.
    pub fn info(&self) -> ParamInfo {
        ParamInfo {
            id: VOLUME_PARAM_ID,
            version: Self::VERSION,
            name: "VOLUME",
            group_id: "sliders",
            group_name: "SLIDERS",
            group_separator: "|",
            step: Self::STEP,
            default_value: self.default_value,
        }
    }

    /// Type-erased gain mapping of this parameter, for host glue converting between plain and normalized values.
    pub fn mapping(&self) -> DynMapping {
        self.range.gain_mapping().into_dyn()
    }

    /// Current linear gain. Exactly zero when the parameter is off.
    pub fn gain(&self) -> f64 {
        self.range.denormalize_volume(self.get_value() as f64)
    }

    /// Current value in decibels.
    pub fn db(&self) -> f64 {
        self.range.denormalize_db(self.get_value() as f64)
    }

    /// Change the parameter from a linear gain. A gain of zero sets the parameter to its minimum.
    pub fn set_gain(&self, gain: f64) {
        self.set_value(self.range.normalize_volume(gain) as f32);
    }

    /// Change the parameter from a decibel value.
    pub fn set_db(&self, db: f64) {
        self.set_value(self.range.normalize_db(db) as f32);
    }

    /// Text representation of the current value, truncated to at most `max_len` characters.
    pub fn to_text(&self, max_len: usize) -> String {
        self.range.format(self.get_value() as f64, max_len)
    }

    /// Change the parameter from its text representation.
    ///
    /// On error the parameter is left unchanged.
    pub fn try_set_from_text(&self, text: &str) -> Result<(), ParseVolumeError> {
        let value = self.range.try_parse(text)?;
        self.set_value(value as f32);
        Ok(())
    }

    /// Change the parameter from its text representation, returning whether the text was accepted.
    pub fn set_from_text(&self, text: &str) -> bool {
        match self.range.parse(text) {
            Some(value) => {
                self.set_value(value as f32);
                true
            }
            None => false,
        }
    }

    /// Restore the default value.
    pub fn reset(&self) {
        self.set_value(self.default_value);
    }

    /// Returns true if the value has changed since the last call to [`Self::has_changed`]. This method **does not**
    /// reset the changed flag.
    pub fn get_changed(&self) -> bool {
        self.changed.load(Self::ORDERING)
    }

    /// Returns true if the value has changed since we last called this method.
    pub fn has_changed(&self) -> bool {
        self.changed.swap(false, Self::ORDERING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Mapping;
    use std::sync::Arc;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_param_send_sync() {
        fn ensure_send_sync<T: Send + Sync>() {}

        ensure_send_sync::<VolumeParam>();
    }

    #[test]
    fn test_default_is_unity() {
        let param = VolumeParam::default();
        assert_eq!(0.5, param.get_value());
        approx::assert_relative_eq!(1.0, param.gain(), epsilon = 1e-9);
        assert_eq!("0.0dB", param.to_text(16));
        assert_eq!(param.default_value(), param.info().default_value);
    }

    #[test]
    fn test_set_value_clamps() {
        let param = VolumeParam::default();
        param.set_value(1.5);
        assert_eq!(1.0, param.get_value());
        param.set_value(-0.2);
        assert_eq!(0.0, param.get_value());
        assert_eq!(0.0, param.gain());
    }

    #[test]
    fn test_nan_is_ignored() {
        init_logger();
        let param = VolumeParam::default();
        assert!(param.has_changed());
        param.set_value(f32::NAN);
        assert_eq!(0.5, param.get_value());
        assert!(!param.has_changed());
        param.set_gain(-1.0);
        assert_eq!(0.5, param.get_value());
    }

    #[test]
    fn test_set_gain() {
        let param = VolumeParam::default();
        param.set_gain(0.0);
        assert_eq!(0.0, param.get_value());
        assert_eq!("OFF", param.to_text(16));
        param.set_gain(0.5);
        approx::assert_relative_eq!(0.5, param.gain(), max_relative = 1e-5);
    }

    #[test]
    fn test_set_db() {
        let param = VolumeParam::default();
        param.set_db(-12.0);
        approx::assert_relative_eq!(-12.0, param.db(), epsilon = 1e-4);
        assert_eq!("-12.0dB", param.to_string());
    }

    #[test]
    fn test_text_interface() {
        init_logger();
        let param = VolumeParam::default();
        assert!(param.set_from_text("-6dB"));
        assert_eq!("-6.0dB", param.to_text(16));

        let before = param.get_value();
        assert!(!param.set_from_text("garbage"));
        assert_eq!(before, param.get_value());
        assert_eq!(
            Err(ParseVolumeError::OutOfRange("1e999".to_owned())),
            param.try_set_from_text("1e999")
        );
        assert_eq!(before, param.get_value());

        assert!(param.set_from_text("off"));
        assert_eq!(0.0, param.gain());
        assert_eq!("OFF", param.to_text(16));
    }

    #[test]
    fn test_changed_flag() {
        let param = VolumeParam::default();
        assert!(param.get_changed());
        assert!(param.has_changed());
        assert!(!param.has_changed());
        param.set_value(0.25);
        assert!(param.get_changed());
        assert!(param.has_changed());
        param.reset();
        assert_eq!(param.default_value(), param.get_value());
        assert!(param.has_changed());
    }

    #[test]
    fn test_info() {
        let info = VolumeParam::default().info();
        assert_eq!(VOLUME_PARAM_ID, info.id);
        assert_eq!("VOLUME", info.name);
        assert_eq!(1, info.version);
        assert_eq!("sliders", info.group_id);
        assert_eq!("SLIDERS", info.group_name);
        assert_eq!("|", info.group_separator);
        assert_eq!(1e-7, info.step);
    }

    #[test]
    fn test_mapping_matches_gain() {
        let param = VolumeParam::default();
        let mapping = param.mapping();
        for value in [0.0, 0.2, 0.5, 0.9, 1.0] {
            param.set_value(value);
            assert_eq!(mapping.denormalize(value as f64), param.gain());
        }
        assert_eq!(0.0, mapping.range().start);
    }

    #[test]
    fn test_custom_range() {
        let range = VolumeRange::new(-48.0, 12.0, -47.0).unwrap();
        let param = VolumeParam::new(range);
        assert_eq!(0.5, param.get_value());
        param.set_value(0.0);
        assert_eq!("OFF", param.to_text(16));
        param.set_value(1.0);
        approx::assert_relative_eq!(12.0, param.db(), epsilon = 1e-4);
    }

    #[test]
    fn test_ui_writes_audio_reads() {
        let param = Arc::new(VolumeParam::default());
        let ui = {
            let param = param.clone();
            std::thread::spawn(move || param.set_from_text("-20dB"))
        };
        assert!(ui.join().unwrap());
        assert!(param.has_changed());
        approx::assert_relative_eq!(0.1, param.gain(), max_relative = 1e-5);
    }
}
