//! Waveform plot PNG: a min/max envelope per pixel column.

use image::{Rgb, RgbImage};
use std::path::Path;

use longform_domain::{AudioBuffer, GenerationError};

use crate::config::PlotConfig;

/// Render `audio` into an image sized by `cfg`.
///
/// The envelope is scaled to the clip's peak; a silent or empty clip draws a
/// flat centre line.
pub fn render_waveform(audio: &AudioBuffer, cfg: &PlotConfig) -> RgbImage {
    let (width, height) = (cfg.width.max(1), cfg.height.max(1));
    let mut img = RgbImage::from_pixel(width, height, Rgb(cfg.background));
    let fg = Rgb(cfg.foreground);
    let mid = (height - 1) as f32 / 2.0;

    let samples = audio.samples();
    let peak = audio.peak();
    let scale = if peak > 0.0 { 1.0 / peak } else { 1.0 };
    let bin = samples.len().div_ceil(width as usize).max(1);

    for x in 0..width {
        let start = x as usize * bin;
        let end = (start + bin).min(samples.len());
        let (lo, hi) = if start < end {
            samples[start..end]
                .iter()
                .fold((0.0f32, 0.0f32), |(lo, hi), &s| (lo.min(s), hi.max(s)))
        } else {
            (0.0, 0.0)
        };

        let top = (mid - hi * scale * mid).round().clamp(0.0, (height - 1) as f32) as u32;
        let bottom = (mid - lo * scale * mid).round().clamp(0.0, (height - 1) as f32) as u32;
        for y in top..=bottom {
            img.put_pixel(x, y, fg);
        }
    }
    img
}

/// Render and save the plot as PNG.
pub fn save_waveform_plot(
    path: &Path,
    audio: &AudioBuffer,
    cfg: &PlotConfig,
) -> Result<(), GenerationError> {
    render_waveform(audio, cfg)
        .save(path)
        .map_err(|e| GenerationError::persistence(format!("{}: {e}", path.display())))
}
