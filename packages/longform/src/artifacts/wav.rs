//! WAV output: mono 16-bit PCM at the buffer's own rate.

use hound::{SampleFormat, WavSpec, WavWriter};
use std::path::Path;

use longform_domain::{AudioBuffer, GenerationError};

/// Write `audio` to `path` as a 16-bit mono WAV.
pub fn write_wav(path: &Path, audio: &AudioBuffer) -> Result<(), GenerationError> {
    if audio.sample_rate == 0 {
        return Err(GenerationError::persistence(format!(
            "refusing to write {} at 0 Hz",
            path.display()
        )));
    }

    let spec = WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let wav_err = |e: hound::Error| GenerationError::persistence(format!("{}: {e}", path.display()));

    let mut writer = WavWriter::create(path, spec).map_err(wav_err)?;
    for sample in audio.to_pcm_i16() {
        writer.write_sample(sample).map_err(wav_err)?;
    }
    writer.finalize().map_err(wav_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn written_file_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audio.wav");
        let audio = AudioBuffer::new(24_000, vec![0.0, 0.5, -0.5, 1.0]);

        write_wav(&path, &audio).unwrap();

        let mut reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24_000);
        assert_eq!(reader.spec().channels, 1);
        let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
        assert_eq!(samples, audio.to_pcm_i16());
    }
}
