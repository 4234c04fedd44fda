//! Operating-point excitations and harmonic selection.

use std::f64::consts::PI;

use crate::errors::{MagneticFieldError, Result};
use crate::math::{phasor, CScalar, Scalar};

/// Fourier decomposition of a periodic signal. Index 0 is the DC term.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Harmonics {
    /// Peak amplitude of each harmonic.
    pub amplitudes: Vec<Scalar>,
    /// Frequency of each harmonic (Hz).
    pub frequencies: Vec<Scalar>,
    /// Phase of each harmonic (rad), when known.
    pub phases: Option<Vec<Scalar>>,
}

impl Harmonics {
    /// Creates harmonics without phase information.
    pub fn new(amplitudes: Vec<Scalar>, frequencies: Vec<Scalar>) -> Result<Self> {
        let harmonics = Self {
            amplitudes,
            frequencies,
            phases: None,
        };
        harmonics.validate()?;
        Ok(harmonics)
    }

    /// Attaches phases, one per harmonic.
    pub fn with_phases(mut self, phases: Vec<Scalar>) -> Result<Self> {
        self.phases = Some(phases);
        self.validate()?;
        Ok(self)
    }

    /// Checks that amplitudes, frequencies and phases have one entry per harmonic.
    pub fn validate(&self) -> Result<()> {
        if self.amplitudes.len() != self.frequencies.len() {
            return Err(MagneticFieldError::InvalidInput(format!(
                "{} harmonic amplitudes but {} frequencies",
                self.amplitudes.len(),
                self.frequencies.len()
            )));
        }
        match &self.phases {
            Some(phases) if phases.len() != self.amplitudes.len() => Err(MagneticFieldError::InvalidInput(format!(
                "{} harmonic phases for {} harmonics",
                phases.len(),
                self.amplitudes.len()
            ))),
            _ => Ok(()),
        }
    }

    /// Single-sided spectrum of one uniformly sampled period of a waveform.
    ///
    /// Amplitudes are peak values; harmonics up to the Nyquist index are returned.
    pub fn from_waveform(samples: &[Scalar], fundamental: Scalar) -> Result<Self> {
        let n = samples.len();
        if n < 2 || fundamental <= 0.0 {
            return Err(MagneticFieldError::InvalidInput(
                "waveform needs at least two samples and a positive fundamental".into(),
            ));
        }
        let count = n / 2 + 1;
        let mut amplitudes = Vec::with_capacity(count);
        let mut frequencies = Vec::with_capacity(count);
        let mut phases = Vec::with_capacity(count);
        for k in 0..count {
            let bin: CScalar = samples
                .iter()
                .enumerate()
                .map(|(i, &sample)| phasor(-2.0 * PI * (k * i) as Scalar / n as Scalar) * sample)
                .sum();
            let scale = if k == 0 || (n % 2 == 0 && k == n / 2) { 1.0 } else { 2.0 };
            amplitudes.push(scale * bin.norm() / n as Scalar);
            frequencies.push(k as Scalar * fundamental);
            phases.push(bin.arg());
        }
        Ok(Self {
            amplitudes,
            frequencies,
            phases: Some(phases),
        })
    }

    /// Phase of harmonic `index`, zero when unknown.
    #[must_use]
    pub fn phase(&self, index: usize) -> Scalar {
        self.phases
            .as_ref()
            .and_then(|phases| phases.get(index))
            .copied()
            .unwrap_or(0.0)
    }

    /// Amplitude of harmonic `index`, zero when absent.
    #[must_use]
    pub fn amplitude(&self, index: usize) -> Scalar {
        self.amplitudes.get(index).copied().unwrap_or(0.0)
    }

    /// Indices (≥ 1) of harmonics whose `amplitude·√f` reaches `threshold`
    /// times the largest such product.
    #[must_use]
    pub fn main_harmonic_indexes(&self, threshold: Scalar) -> Vec<usize> {
        let weights: Vec<Scalar> = self
            .amplitudes
            .iter()
            .zip(&self.frequencies)
            .map(|(&amplitude, &frequency)| amplitude * frequency.max(0.0).sqrt())
            .collect();
        let maximum = weights.iter().skip(1).copied().fold(0.0, Scalar::max);
        if maximum == 0.0 {
            return Vec::new();
        }
        weights
            .iter()
            .enumerate()
            .skip(1)
            .filter(|&(_, &weight)| weight >= maximum * threshold)
            .map(|(index, _)| index)
            .collect()
    }
}

/// Excitation of one winding.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Excitation {
    /// Switching (fundamental) frequency in hertz.
    pub frequency: Scalar,
    /// Current harmonics.
    pub current: Harmonics,
    /// Peak magnetizing current, when known.
    pub magnetizing_current_peak: Option<Scalar>,
}

impl Excitation {
    /// Creates an excitation from its current harmonics.
    #[must_use]
    pub const fn new(frequency: Scalar, current: Harmonics) -> Self {
        Self {
            frequency,
            current,
            magnetizing_current_peak: None,
        }
    }

    /// Pure sinusoidal current of `peak` amperes at `frequency`.
    #[must_use]
    pub fn sinusoidal(frequency: Scalar, peak: Scalar) -> Self {
        Self::new(
            frequency,
            Harmonics {
                amplitudes: vec![0.0, peak],
                frequencies: vec![0.0, frequency],
                phases: None,
            },
        )
    }

    /// Sets the magnetizing current peak.
    #[must_use]
    pub fn with_magnetizing_current_peak(mut self, peak: Scalar) -> Self {
        self.magnetizing_current_peak = Some(peak);
        self
    }
}

/// Excitations of every winding plus ambient conditions.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingPoint {
    /// One excitation per winding, primary first.
    pub excitations_per_winding: Vec<Excitation>,
    /// Ambient temperature in degrees Celsius.
    pub ambient_temperature: Scalar,
}

impl OperatingPoint {
    /// Creates an operating point at the default ambient temperature.
    #[must_use]
    pub fn new(excitations_per_winding: Vec<Excitation>) -> Self {
        Self {
            excitations_per_winding,
            ambient_temperature: crate::constants::DEFAULT_AMBIENT_TEMPERATURE,
        }
    }

    /// Primary excitation.
    pub fn primary(&self) -> Result<&Excitation> {
        self.excitations_per_winding
            .first()
            .ok_or_else(|| MagneticFieldError::InvalidInput("operating point has no excitations".into()))
    }

    /// Checks the harmonics of every winding.
    pub fn validate(&self) -> Result<()> {
        self.excitations_per_winding
            .iter()
            .try_for_each(|excitation| excitation.current.validate())
    }

    /// Sorted union of the main harmonic indexes of every winding.
    #[must_use]
    pub fn common_harmonic_indexes(&self, threshold: Scalar) -> Vec<usize> {
        let mut indexes: Vec<usize> = self
            .excitations_per_winding
            .iter()
            .flat_map(|excitation| excitation.current.main_harmonic_indexes(threshold))
            .collect();
        indexes.sort_unstable();
        indexes.dedup();
        indexes
    }

    /// Frequency of harmonic `index`, taken from the first winding that has it.
    #[must_use]
    pub fn harmonic_frequency(&self, index: usize) -> Option<Scalar> {
        self.excitations_per_winding
            .iter()
            .find_map(|excitation| excitation.current.frequencies.get(index).copied())
    }

    /// Returns `true` if any winding carries harmonic phases.
    #[must_use]
    pub fn has_phases(&self) -> bool {
        self.excitations_per_winding
            .iter()
            .any(|excitation| excitation.current.phases.is_some())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn triangular_samples(peak: Scalar, count: usize) -> Vec<Scalar> {
        (0..count)
            .map(|i| {
                let t = i as Scalar / count as Scalar;
                if t < 0.5 {
                    peak * (4.0 * t - 1.0)
                } else {
                    peak * (3.0 - 4.0 * t)
                }
            })
            .collect()
    }

    #[test]
    fn spectrum_of_a_triangle_has_odd_harmonics() {
        let harmonics = Harmonics::from_waveform(&triangular_samples(10.0, 256), 100.0e3).unwrap();
        let expected_fundamental = 8.0 * 10.0 / (PI * PI);
        assert_relative_eq!(harmonics.amplitudes[1], expected_fundamental, max_relative = 1.0e-3);
        assert_relative_eq!(harmonics.amplitudes[3], expected_fundamental / 9.0, max_relative = 1.0e-2);
        assert!(harmonics.amplitudes[2] < 1.0e-9);
        assert_relative_eq!(harmonics.frequencies[5], 500.0e3);
    }

    #[test]
    fn main_harmonics_weight_by_root_frequency() {
        let harmonics = Harmonics::from_waveform(&triangular_samples(10.0, 256), 100.0e3).unwrap();
        assert_eq!(harmonics.main_harmonic_indexes(0.05), vec![1, 3, 5, 7]);
    }

    #[test]
    fn common_indexes_are_a_sorted_union() {
        let primary = Excitation::new(
            1.0e3,
            Harmonics::new(vec![0.0, 1.0, 0.0, 0.0], vec![0.0, 1.0e3, 2.0e3, 3.0e3]).unwrap(),
        );
        let secondary = Excitation::new(
            1.0e3,
            Harmonics::new(vec![0.0, 1.0, 0.0, 0.9], vec![0.0, 1.0e3, 2.0e3, 3.0e3]).unwrap(),
        );
        let operating_point = OperatingPoint::new(vec![secondary, primary]);
        assert_eq!(operating_point.common_harmonic_indexes(0.1), vec![1, 3]);
        assert!(!operating_point.has_phases());
    }

    #[test]
    fn mismatched_harmonic_lengths_are_rejected() {
        assert!(Harmonics::new(vec![1.0], vec![1.0, 2.0]).is_err());
        let unphased = Harmonics::new(vec![0.0, 1.0], vec![0.0, 1.0e3]).unwrap();
        assert!(unphased.with_phases(vec![0.0]).is_err());
    }

    #[test]
    fn hand_built_harmonics_with_missing_frequencies_do_not_panic() {
        let harmonics = Harmonics {
            amplitudes: vec![0.0, 1.0, 0.5],
            frequencies: vec![0.0, 1.0e5],
            phases: None,
        };
        assert_eq!(harmonics.main_harmonic_indexes(0.05), vec![1]);
        assert!(matches!(harmonics.validate(), Err(MagneticFieldError::InvalidInput(_))));

        let operating_point = OperatingPoint::new(vec![Excitation::new(1.0e5, harmonics)]);
        assert!(operating_point.validate().is_err());
        assert!(OperatingPoint::new(vec![Excitation::sinusoidal(1.0e5, 1.0)]).validate().is_ok());
    }
}
