//! Coil sequencing for 4-wire stepper actuators.
//!
//! Maps an absolute step index to the set of coil lines that must be
//! energized for the selected [`DriveMode`]. Rendering is a pure function
//! of `(step mod modulus, mode)`; nothing else influences the pattern.
//!
//! # Drive Modes
//!
//! | Mode | Phases | Sequence | Coils on |
//! |------|--------|----------|----------|
//! | [`FullStep`](DriveMode::FullStep) | 4 | AB, BC, CD, DA | 2 |
//! | [`HalfStep`](DriveMode::HalfStep) | 8 | A, AB, B, BC, C, CD, D, DA | 1 or 2 |
//! | [`WaveDrive`](DriveMode::WaveDrive) | 4 | A, B, C, D | 1 |
//!
//! # Example
//!
//! ```rust
//! use valve_actuator::sequencer::{render, DriveMode};
//!
//! assert_eq!(render(0, DriveMode::FullStep).bits(), 0b0011);
//! assert_eq!(render(1, DriveMode::HalfStep).bits(), 0b0011);
//!
//! // Negative indices wrap like positive ones
//! assert_eq!(render(-1, DriveMode::FullStep), render(3, DriveMode::FullStep));
//! ```

/// Number of coil terminals a pattern can address (A, B, C, D).
pub const COIL_COUNT: usize = 4;

/// Coil energization strategy.
///
/// Fixed at configuration time. Determines the phase modulus and which
/// coils are active for each phase.
///
/// # Default
///
/// Defaults to [`FullStep`](Self::FullStep), the highest-torque mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum DriveMode {
    /// Two adjacent coils always on.
    #[default]
    FullStep,
    /// Alternates single and dual coil energization, doubling resolution.
    HalfStep,
    /// One coil at a time.
    WaveDrive,
}

impl DriveMode {
    /// All drive modes, in configuration order.
    pub const ALL: [DriveMode; 3] = [DriveMode::FullStep, DriveMode::HalfStep, DriveMode::WaveDrive];

    /// Number of distinct phases before the pattern repeats.
    #[inline]
    pub const fn modulus(self) -> i32 {
        match self {
            DriveMode::HalfStep => 8,
            DriveMode::FullStep | DriveMode::WaveDrive => 4,
        }
    }

    /// Returns the human-readable name used in configuration dumps.
    ///
    /// # Examples
    ///
    /// ```
    /// use valve_actuator::DriveMode;
    ///
    /// assert_eq!(DriveMode::FullStep.as_str(), "FULL STEP");
    /// assert_eq!(DriveMode::WaveDrive.as_str(), "WAVE DRIVE");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DriveMode::FullStep => "FULL STEP",
            DriveMode::HalfStep => "HALF STEP",
            DriveMode::WaveDrive => "WAVE DRIVE",
        }
    }

    /// Returns the configuration key for this mode (`FULL_STEP`, ...).
    #[inline]
    pub const fn config_key(&self) -> &'static str {
        match self {
            DriveMode::FullStep => "FULL_STEP",
            DriveMode::HalfStep => "HALF_STEP",
            DriveMode::WaveDrive => "WAVE_DRIVE",
        }
    }

    /// Parse a drive mode from configuration text.
    ///
    /// Accepts `FULL_STEP`, `HALF_STEP` and `WAVE_DRIVE`. Input is trimmed
    /// and case-insensitive, and spaces or dashes count as underscores.
    ///
    /// # Examples
    ///
    /// ```
    /// use valve_actuator::DriveMode;
    ///
    /// assert_eq!(DriveMode::from_text("FULL_STEP"), Some(DriveMode::FullStep));
    /// assert_eq!(DriveMode::from_text("half step"), Some(DriveMode::HalfStep));
    /// assert_eq!(DriveMode::from_text(" wave-drive "), Some(DriveMode::WaveDrive));
    /// assert_eq!(DriveMode::from_text("micro_step"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|mode| {
            let key = mode.config_key().as_bytes();
            s.len() == key.len()
                && s.bytes().zip(key.iter()).all(|(c, &k)| match c {
                    b' ' | b'-' | b'_' => k == b'_',
                    c => c.to_ascii_uppercase() == k,
                })
        })
    }

    /// Reduce an absolute step index to a phase index in `[0, modulus)`.
    ///
    /// Uses the mathematical (Euclidean) remainder, so negative steps map
    /// onto the same cycle as positive ones.
    #[inline]
    pub const fn phase(self, step: i32) -> u32 {
        step.rem_euclid(self.modulus()) as u32
    }
}

impl core::fmt::Display for DriveMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bitset of energized coil lines.
///
/// Bit 0 is line A, bit 1 line B, bit 2 line C and bit 3 line D.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoilPattern(u8);

impl CoilPattern {
    /// All coils de-energized.
    pub const OFF: CoilPattern = CoilPattern(0);

    /// Build a pattern from raw bits. Bits above line D are discarded.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        CoilPattern(bits & 0x0F)
    }

    /// Raw bit representation.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the coil at `line` (0 = A) is energized.
    #[inline]
    pub const fn is_energized(self, line: usize) -> bool {
        line < COIL_COUNT && (self.0 >> line) & 1 == 1
    }

    /// Number of energized coils.
    #[inline]
    pub const fn energized_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Output levels for the first `N` lines, in line order.
    pub fn levels<const N: usize>(self) -> [bool; N] {
        core::array::from_fn(|line| self.is_energized(line))
    }
}

/// Render the coil pattern for an absolute step index.
///
/// Pure and total: every `i32` is a valid step, and the result depends only
/// on `step mod mode.modulus()` and `mode`.
pub fn render(step: i32, mode: DriveMode) -> CoilPattern {
    let i = mode.phase(step);
    let bits = match mode {
        // AB, BC, CD, DA
        DriveMode::FullStep => (1u8 << i) | (1u8 << ((i + 1) % 4)),
        // A, AB, B, BC, C, CD, D, DA
        DriveMode::HalfStep => (1u8 << (i >> 1)) | (1u8 << (((i + 1) >> 1) & 0x3)),
        // A, B, C, D
        DriveMode::WaveDrive => 1u8 << i,
    };
    CoilPattern(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(steps: core::ops::Range<i32>, mode: DriveMode) -> heapless::Vec<u8, 16> {
        steps.map(|s| render(s, mode).bits()).collect()
    }

    // =========================================================================
    // Sequence Tests
    // =========================================================================

    #[test]
    fn full_step_sequence() {
        assert_eq!(
            bits(0..5, DriveMode::FullStep).as_slice(),
            &[0b0011, 0b0110, 0b1100, 0b1001, 0b0011]
        );
    }

    #[test]
    fn wave_drive_sequence() {
        assert_eq!(
            bits(0..4, DriveMode::WaveDrive).as_slice(),
            &[0b0001, 0b0010, 0b0100, 0b1000]
        );
    }

    #[test]
    fn half_step_sequence() {
        assert_eq!(
            bits(0..8, DriveMode::HalfStep).as_slice(),
            &[0b0001, 0b0011, 0b0010, 0b0110, 0b0100, 0b1100, 0b1000, 0b1001]
        );
    }

    // =========================================================================
    // Periodicity & Wraparound Tests
    // =========================================================================

    #[test]
    fn patterns_repeat_every_modulus() {
        for mode in DriveMode::ALL {
            let n = mode.modulus();
            for s in -40..40 {
                assert_eq!(render(s, mode), render(s + n, mode), "{mode:?} at {s}");
            }
        }
    }

    #[test]
    fn negative_index_wraps() {
        assert_eq!(render(-1, DriveMode::FullStep), render(3, DriveMode::FullStep));
        assert_eq!(render(-1, DriveMode::HalfStep), render(7, DriveMode::HalfStep));
        assert_eq!(render(-5, DriveMode::WaveDrive), render(3, DriveMode::WaveDrive));
    }

    #[test]
    fn extreme_indices_stay_in_range() {
        for mode in DriveMode::ALL {
            assert!(mode.phase(i32::MIN) < mode.modulus() as u32);
            assert!(mode.phase(i32::MAX) < mode.modulus() as u32);
        }
        // i32::MAX and i32::MIN are adjacent phases after a wrapping increment
        assert_eq!(DriveMode::HalfStep.phase(i32::MAX), 7);
        assert_eq!(DriveMode::HalfStep.phase(i32::MIN), 0);
    }

    // =========================================================================
    // Coil Count Tests
    // =========================================================================

    #[test]
    fn energized_counts_per_mode() {
        for s in -16..16 {
            assert_eq!(render(s, DriveMode::FullStep).energized_count(), 2);
            assert_eq!(render(s, DriveMode::WaveDrive).energized_count(), 1);
            let expected = if s.rem_euclid(2) == 0 { 1 } else { 2 };
            assert_eq!(render(s, DriveMode::HalfStep).energized_count(), expected);
        }
    }

    #[test]
    fn adjacent_half_steps_share_a_coil() {
        for s in -16..16 {
            let a = render(s, DriveMode::HalfStep).bits();
            let b = render(s + 1, DriveMode::HalfStep).bits();
            assert_ne!(a & b, 0, "no shared coil between {s} and {}", s + 1);
        }
    }

    // =========================================================================
    // CoilPattern Tests
    // =========================================================================

    #[test]
    fn pattern_levels() {
        let p = CoilPattern::from_bits(0b1001);
        assert_eq!(p.levels::<4>(), [true, false, false, true]);
        assert_eq!(p.levels::<3>(), [true, false, false]);
        assert!(!p.is_energized(7));
    }

    #[test]
    fn pattern_from_bits_masks_high_bits() {
        assert_eq!(CoilPattern::from_bits(0xF3).bits(), 0x03);
        assert_eq!(CoilPattern::OFF.energized_count(), 0);
    }

    // =========================================================================
    // DriveMode Tests
    // =========================================================================

    #[test]
    fn drive_mode_default() {
        assert_eq!(DriveMode::default(), DriveMode::FullStep);
    }

    #[test]
    fn drive_mode_from_text_config_keys() {
        assert_eq!(DriveMode::from_text("FULL_STEP"), Some(DriveMode::FullStep));
        assert_eq!(DriveMode::from_text("HALF_STEP"), Some(DriveMode::HalfStep));
        assert_eq!(DriveMode::from_text("WAVE_DRIVE"), Some(DriveMode::WaveDrive));
    }

    #[test]
    fn drive_mode_from_text_loose_spelling() {
        assert_eq!(DriveMode::from_text("full step"), Some(DriveMode::FullStep));
        assert_eq!(DriveMode::from_text("Half-Step"), Some(DriveMode::HalfStep));
        assert_eq!(DriveMode::from_text("\twave_drive\n"), Some(DriveMode::WaveDrive));
    }

    #[test]
    fn drive_mode_from_text_invalid() {
        assert_eq!(DriveMode::from_text(""), None);
        assert_eq!(DriveMode::from_text("FULL"), None);
        assert_eq!(DriveMode::from_text("FULLSTEP"), None);
        assert_eq!(DriveMode::from_text("FULL_STEPS"), None);
    }

    #[test]
    fn drive_mode_names_round_trip() {
        for mode in DriveMode::ALL {
            assert_eq!(DriveMode::from_text(mode.config_key()), Some(mode));
            assert_eq!(DriveMode::from_text(mode.as_str()), Some(mode));
        }
    }
}
