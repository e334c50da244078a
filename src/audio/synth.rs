//! Additive waveform synthesis driven by the measurement triplet.
//!
//! Vegetation feeds a tonal blend of sine partials, rain feeds a square-wave
//! synth and a Gaussian rain texture, and temperature sets the tempo of a
//! rhythmic gate. The mix is peak-normalized and quantized to 16-bit PCM.

use std::f64::consts::TAU;

use crate::measure::{MeasurementTriplet, NormalizedTriplet};
use crate::rng::{texture_seed, DeterministicRng};

use super::config::AudioConfig;
use super::style::{Style, StylePreset};

/// Full-scale value for signed 16-bit samples.
pub const FULL_SCALE: f64 = i16::MAX as f64;

/// Quantized mono clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Waveform {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl Waveform {
    /// Largest absolute sample value.
    pub fn peak(&self) -> u16 {
        self.samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0)
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Beats per minute: style base plus a temperature-driven offset.
pub fn tempo_bpm(n: &NormalizedTriplet, preset: &StylePreset, cfg: &AudioConfig) -> f64 {
    preset.base_tempo_bpm + (n.lst_n * cfg.tempo_span_bpm).trunc()
}

/// Standard deviation of the rain texture; grows with `precip_n`.
pub fn noise_amplitude(n: &NormalizedTriplet, cfg: &AudioConfig) -> f64 {
    cfg.noise_gain * n.precip_n
}

/// Frequency of the square-wave synth; rises with `precip_n`.
pub fn synth_frequency(n: &NormalizedTriplet, cfg: &AudioConfig) -> f64 {
    cfg.synth_base_hz + n.precip_n * cfg.synth_span_hz
}

#[inline]
fn time_at(i: usize, cfg: &AudioConfig) -> f64 {
    i as f64 / cfg.sample_rate as f64
}

/// Weighted sine partials, louder with vegetation.
pub fn tonal_component(n: &NormalizedTriplet, preset: &StylePreset, cfg: &AudioConfig) -> Vec<f64> {
    let gain = cfg.level(n.ndvi_n) * preset.tonal_gain;
    (0..cfg.sample_count())
        .map(|i| {
            let t = time_at(i, cfg);
            let blend: f64 = cfg
                .partials
                .iter()
                .map(|p| p.weight * (TAU * p.frequency_hz * t).sin())
                .sum();
            blend * gain
        })
        .collect()
}

/// Square wave (sign of a sine), higher and louder with rain.
pub fn synth_component(n: &NormalizedTriplet, preset: &StylePreset, cfg: &AudioConfig) -> Vec<f64> {
    let freq = synth_frequency(n, cfg);
    let gain = cfg.level(n.precip_n) * preset.synth_gain;
    (0..cfg.sample_count())
        .map(|i| sign((TAU * freq * time_at(i, cfg)).sin()) * gain)
        .collect()
}

/// On/off envelope at the beat frequency; "off" holds at the gate floor.
pub fn gate_envelope(tempo_bpm: f64, cfg: &AudioConfig) -> Vec<f64> {
    let beat_hz = tempo_bpm / 60.0;
    (0..cfg.sample_count())
        .map(|i| {
            if (TAU * beat_hz * time_at(i, cfg)).sin() > 0.0 {
                1.0
            } else {
                cfg.gate_floor
            }
        })
        .collect()
}

/// Gaussian rain texture from a generator seeded by the raw measurements.
pub fn noise_texture(m: &MeasurementTriplet, cfg: &AudioConfig) -> Vec<f64> {
    let amplitude = noise_amplitude(&m.normalized(), cfg);
    let mut rng = DeterministicRng::from_seed(texture_seed(m));
    (0..cfg.sample_count()).map(|_| rng.normal(1.0) * amplitude).collect()
}

/// Synthesizes a clip for `measurements`.
///
/// Styled clips soft-clip the tonal+synth sum with `tanh` before the synth
/// and rain are layered back on top; the unstyled clip mixes linearly.
pub fn synthesize(
    measurements: &MeasurementTriplet,
    style: Option<Style>,
    cfg: &AudioConfig,
) -> Waveform {
    let n = measurements.normalized();
    let preset = StylePreset::for_style(style);
    let tempo = tempo_bpm(&n, &preset, cfg);
    log::debug!(
        "synthesizing {}s at {} Hz, style={}, tempo={:.0} bpm",
        cfg.duration_secs,
        cfg.sample_rate,
        style.map_or("none", |s| s.name()),
        tempo
    );

    let tonal = tonal_component(&n, &preset, cfg);
    let synth = synth_component(&n, &preset, cfg);
    let gate = gate_envelope(tempo, cfg);
    let noise = noise_texture(measurements, cfg);

    let drive = 1.0 + preset.distortion;
    let mut mix: Vec<f64> = tonal
        .iter()
        .zip(&synth)
        .zip(noise.iter().zip(&gate))
        .map(|((&a, &s), (&r, &g))| {
            let body = match style {
                Some(_) => ((a + s) * drive).tanh() + s,
                None => a + s,
            };
            (body + r) * g
        })
        .collect();

    peak_normalize(&mut mix, cfg.normalize_epsilon);

    Waveform {
        sample_rate: cfg.sample_rate,
        samples: quantize(&mix),
    }
}

/// Divides by `max|x| + epsilon` so the loudest sample lands just under full scale.
pub fn peak_normalize(signal: &mut [f64], epsilon: f64) {
    let peak = signal.iter().fold(0.0f64, |m, s| m.max(s.abs()));
    let scale = 1.0 / (peak + epsilon);
    for s in signal.iter_mut() {
        *s *= scale;
    }
}

/// Converts `[-1, 1]` samples to signed 16-bit, truncating toward zero.
pub fn quantize(signal: &[f64]) -> Vec<i16> {
    signal
        .iter()
        .map(|s| (s * FULL_SCALE).clamp(-FULL_SCALE - 1.0, FULL_SCALE) as i16)
        .collect()
}

#[inline]
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short() -> AudioConfig {
        AudioConfig::with_duration(2)
    }

    #[test]
    fn clip_has_configured_length() {
        let cfg = short();
        let wave = synthesize(&MeasurementTriplet::new(0.5, 20.0, 100.0), Some(Style::Rock), &cfg);
        assert_eq!(wave.samples.len(), 88_200);
        assert_eq!(wave.sample_rate, 44_100);
        assert_eq!(wave.duration_secs(), 2.0);
    }

    #[test]
    fn identical_inputs_synthesize_identical_samples() {
        let cfg = short();
        let m = MeasurementTriplet::new(0.37, 12.5, 222.0);
        for style in [None, Some(Style::Classical), Some(Style::Edm)] {
            assert_eq!(synthesize(&m, style, &cfg), synthesize(&m, style, &cfg));
        }
    }

    #[test]
    fn output_reaches_full_scale() {
        let cfg = short();
        let inputs = [
            MeasurementTriplet::new(0.0, -10.0, 0.0),
            MeasurementTriplet::new(0.8, 30.0, 10.0),
            MeasurementTriplet::new(0.1, -5.0, 480.0),
            MeasurementTriplet::new(1.2, 60.0, 900.0),
        ];
        for m in inputs {
            for style in [None, Some(Style::Rock)] {
                let peak = synthesize(&m, style, &cfg).peak();
                assert!((32_700..=32_767).contains(&peak), "peak {peak} for {m:?}");
            }
        }
    }

    #[test]
    fn zero_duration_is_empty_not_a_panic() {
        let cfg = AudioConfig::with_duration(0);
        let wave = synthesize(&MeasurementTriplet::new(0.5, 20.0, 100.0), None, &cfg);
        assert!(wave.is_empty());
        assert_eq!(wave.peak(), 0);
    }

    #[test]
    fn silent_signal_stays_silent() {
        let mut signal = vec![0.0; 16];
        peak_normalize(&mut signal, 1e-8);
        assert!(quantize(&signal).iter().all(|&s| s == 0));
    }

    #[test]
    fn quantize_saturates_into_i16() {
        assert_eq!(quantize(&[1.0, -1.0, 2.0, -2.0, 0.5]), vec![32767, -32767, 32767, -32768, 16383]);
    }

    #[test]
    fn rain_never_quiets_the_texture() {
        let cfg = AudioConfig::default();
        let mut prev = 0.0;
        for mm in (0..=500).step_by(25) {
            let n = MeasurementTriplet::new(0.4, 15.0, mm as f64).normalized();
            let amp = noise_amplitude(&n, &cfg);
            assert!(amp >= prev);
            prev = amp;
        }
    }

    #[test]
    fn noise_texture_spread_matches_amplitude() {
        let cfg = short();
        let m = MeasurementTriplet::new(0.1, -5.0, 480.0);
        let noise = noise_texture(&m, &cfg);
        let rms = (noise.iter().map(|x| x * x).sum::<f64>() / noise.len() as f64).sqrt();
        let expected = noise_amplitude(&m.normalized(), &cfg);
        assert!((rms - expected).abs() < expected * 0.05, "rms {rms} vs {expected}");
    }

    #[test]
    fn gate_never_drops_below_floor() {
        let cfg = short();
        let gate = gate_envelope(120.0, &cfg);
        assert!(gate.iter().all(|&g| g == 0.35 || g == 1.0));
        assert!(gate.iter().any(|&g| g == 0.35));
        assert!(gate.iter().any(|&g| g == 1.0));
    }

    #[test]
    fn tonal_component_never_fully_silent() {
        let cfg = AudioConfig::with_duration(1);
        let bare = MeasurementTriplet::new(0.0, 20.0, 100.0).normalized();
        let tonal = tonal_component(&bare, &StylePreset::neutral(), &cfg);
        assert!(tonal.iter().any(|x| x.abs() > 0.05));
    }

    #[test]
    fn warm_dry_lush_month_is_fast_and_quiet_on_rain() {
        let cfg = AudioConfig::default();
        let preset = Style::Rock.preset();
        let n = MeasurementTriplet::new(0.8, 30.0, 10.0).normalized();
        let tempo = tempo_bpm(&n, &preset, &cfg);
        assert_eq!(tempo, 148.0);
        assert!(tempo > preset.base_tempo_bpm + 0.7 * cfg.tempo_span_bpm);
        assert!(noise_amplitude(&n, &cfg) < 0.001);
    }

    #[test]
    fn cold_wet_bare_month_is_slow_and_rainy() {
        let cfg = AudioConfig::default();
        let preset = Style::Rock.preset();
        let n = MeasurementTriplet::new(0.1, -5.0, 480.0).normalized();
        assert_eq!(tempo_bpm(&n, &preset, &cfg), 102.0);
        assert!(noise_amplitude(&n, &cfg) > 0.038);
    }

    #[test]
    fn synth_pitch_rises_with_rain() {
        let cfg = AudioConfig::default();
        let dry = MeasurementTriplet::new(0.5, 20.0, 0.0).normalized();
        let wet = MeasurementTriplet::new(0.5, 20.0, 500.0).normalized();
        assert_eq!(synth_frequency(&dry, &cfg), 110.0);
        assert_eq!(synth_frequency(&wet, &cfg), 440.0);
    }

    #[test]
    fn styled_mix_soft_clips_the_body() {
        let cfg = AudioConfig::with_duration(1);
        let m = MeasurementTriplet::new(0.6, 25.0, 300.0);
        let n = m.normalized();
        let preset = Style::Edm.preset();

        let tempo = tempo_bpm(&n, &preset, &cfg);
        assert_eq!(tempo, preset.base_tempo_bpm + (n.lst_n * cfg.tempo_span_bpm).trunc());
        assert_eq!(tempo, 118.0 + 45.0);

        let tonal = tonal_component(&n, &preset, &cfg);
        let synth = synth_component(&n, &preset, &cfg);
        let gate = gate_envelope(tempo, &cfg);
        let noise = noise_texture(&m, &cfg);
        let drive = 1.0 + preset.distortion;

        let mut clipped: Vec<f64> = (0..cfg.sample_count())
            .map(|i| ((((tonal[i] + synth[i]) * drive).tanh() + synth[i]) + noise[i]) * gate[i])
            .collect();
        let mut linear: Vec<f64> = (0..cfg.sample_count())
            .map(|i| (tonal[i] + synth[i] + noise[i]) * gate[i])
            .collect();
        peak_normalize(&mut clipped, cfg.normalize_epsilon);
        peak_normalize(&mut linear, cfg.normalize_epsilon);

        let styled = synthesize(&m, Some(Style::Edm), &cfg);
        assert_eq!(styled.samples, quantize(&clipped));
        assert_ne!(styled.samples, quantize(&linear));
        assert_ne!(styled, synthesize(&m, None, &cfg));
    }
}
