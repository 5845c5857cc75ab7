//! Demo attitude source - LFO-driven roll and pitch
//!
//! Used by the viewer when no vehicle is connected. Each axis is driven by
//! a Low Frequency Oscillator that swings between a minimum and maximum
//! angle at a given frequency.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::sample::AttitudeSample;

/// LFO waveform shapes
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum LfoWaveform {
    /// Smooth sine wave
    Sine,
    /// Linear triangle wave
    Triangle,
    /// Abrupt square wave
    Square,
    /// Rising sawtooth
    Sawtooth,
}

impl LfoWaveform {
    /// Get all waveform types
    pub fn all() -> &'static [LfoWaveform] {
        &[
            LfoWaveform::Sine,
            LfoWaveform::Triangle,
            LfoWaveform::Square,
            LfoWaveform::Sawtooth,
        ]
    }

    /// Get the name of this waveform
    pub fn name(&self) -> &'static str {
        match self {
            LfoWaveform::Sine => "Sine",
            LfoWaveform::Triangle => "Triangle",
            LfoWaveform::Square => "Square",
            LfoWaveform::Sawtooth => "Sawtooth",
        }
    }

    /// Sample the waveform at phase (0.0 to 1.0)
    /// Returns value in range -1.0 to 1.0
    pub fn sample(&self, phase: f32) -> f32 {
        match self {
            LfoWaveform::Sine => (phase * TAU).sin(),

            LfoWaveform::Triangle => {
                let p = phase * 4.0;
                if p < 1.0 {
                    p
                } else if p < 3.0 {
                    2.0 - p
                } else {
                    p - 4.0
                }
            }

            LfoWaveform::Square => {
                if phase < 0.5 { 1.0 } else { -1.0 }
            }

            LfoWaveform::Sawtooth => 2.0 * phase - 1.0,
        }
    }
}

/// Low Frequency Oscillator
#[derive(Clone, Debug)]
pub struct Lfo {
    /// Oscillation frequency in Hz
    pub frequency: f32,
    /// Waveform shape
    pub waveform: LfoWaveform,
    /// Minimum output value
    pub min: f32,
    /// Maximum output value
    pub max: f32,
    /// Phase offset (0.0 to 1.0)
    pub phase_offset: f32,
}

impl Lfo {
    /// Create an LFO swinging ±`amplitude`
    pub fn symmetric(frequency: f32, amplitude: f32) -> Self {
        Self {
            frequency,
            waveform: LfoWaveform::Sine,
            min: -amplitude,
            max: amplitude,
            phase_offset: 0.0,
        }
    }

    /// Set the waveform
    pub fn waveform(mut self, waveform: LfoWaveform) -> Self {
        self.waveform = waveform;
        self
    }

    /// Set the phase offset
    pub fn phase(mut self, offset: f32) -> Self {
        self.phase_offset = offset;
        self
    }

    /// Sample the LFO at a given time
    ///
    /// # Returns
    /// Value between `min` and `max`
    pub fn sample(&self, time: f32) -> f32 {
        let phase = ((time * self.frequency) + self.phase_offset).rem_euclid(1.0);

        let raw = self.waveform.sample(phase);

        // Map -1..1 to min..max
        let normalized = (raw + 1.0) / 2.0;
        self.min + normalized * (self.max - self.min)
    }
}

/// Serializable demo parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub roll_frequency: f32,
    pub roll_amplitude: f32,
    pub pitch_frequency: f32,
    pub pitch_amplitude: f32,
    pub waveform: LfoWaveform,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            roll_frequency: 0.10,
            roll_amplitude: 45.0,
            pitch_frequency: 0.07,
            pitch_amplitude: 30.0,
            waveform: LfoWaveform::Sine,
        }
    }
}

/// Synthetic attitude: roll and pitch driven by independent LFOs
#[derive(Clone, Debug)]
pub struct DemoAttitude {
    pub roll: Lfo,
    pub pitch: Lfo,
}

impl DemoAttitude {
    pub fn new(config: &DemoConfig) -> Self {
        Self {
            roll: Lfo::symmetric(config.roll_frequency, config.roll_amplitude)
                .waveform(config.waveform),
            // Quarter-cycle offset so the two axes don't peak together
            pitch: Lfo::symmetric(config.pitch_frequency, config.pitch_amplitude)
                .waveform(config.waveform)
                .phase(0.25),
        }
    }

    /// Attitude at `time` seconds
    pub fn sample(&self, time: f32) -> AttitudeSample {
        AttitudeSample::from_raw(self.roll.sample(time), self.pitch.sample(time))
    }
}

impl Default for DemoAttitude {
    fn default() -> Self {
        Self::new(&DemoConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_waveform() {
        let wave = LfoWaveform::Sine;
        assert!((wave.sample(0.0) - 0.0).abs() < 0.001);
        assert!((wave.sample(0.25) - 1.0).abs() < 0.001);
        assert!((wave.sample(0.75) - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_triangle_waveform() {
        let wave = LfoWaveform::Triangle;
        assert!((wave.sample(0.25) - 1.0).abs() < 0.001);
        assert!((wave.sample(0.5) - 0.0).abs() < 0.001);
        assert!((wave.sample(0.75) - (-1.0)).abs() < 0.001);
    }

    #[test]
    fn test_lfo_range() {
        let lfo = Lfo::symmetric(1.0, 30.0);
        for i in 0..100 {
            let value = lfo.sample(i as f32 * 0.01);
            assert!((-30.0..=30.0).contains(&value));
        }
        assert!((lfo.sample(0.25) - 30.0).abs() < 0.01);
    }

    #[test]
    fn test_lfo_negative_time() {
        let lfo = Lfo::symmetric(1.0, 10.0).waveform(LfoWaveform::Sawtooth);
        let value = lfo.sample(-0.25);
        assert!((value - 5.0).abs() < 0.01);
    }

    #[test]
    fn test_demo_stays_in_domain() {
        let demo = DemoAttitude::new(&DemoConfig {
            pitch_amplitude: 120.0,
            ..DemoConfig::default()
        });
        for i in 0..500 {
            let sample = demo.sample(i as f32 * 0.1);
            assert!(sample.roll > -180.0 && sample.roll <= 180.0);
            assert!((-90.0..=90.0).contains(&sample.pitch));
        }
    }

    #[test]
    fn test_demo_phase_offset() {
        let demo = DemoAttitude::default();
        let start = demo.sample(0.0);
        assert!(start.roll.abs() < 0.001);
        // Pitch starts a quarter cycle in, at its maximum
        assert!((start.pitch - 30.0).abs() < 0.01);
    }
}
