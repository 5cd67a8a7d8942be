//! Audio and video transcription.
//!
//! Media bytes are written into a scoped temporary directory, transcoded to a
//! 16 kHz mono waveform and handed to a [`SpeechRecognizer`]. The directory is
//! a [`TempDir`], so it and everything written into it (input copy, waveform,
//! recognizer output) is removed on every return path.

use crate::error::{AnalyzerError, Result};
use crate::input::file_detector::{AudioFormat, VideoFormat};
use crate::speech::recognizer::SpeechRecognizer;
use log::{debug, info, warn};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tempfile::TempDir;

/// Sample rate speech models expect
pub const SPEECH_SAMPLE_RATE: u32 = 16_000;

pub trait Transcoder {
    /// Decode `input` and write a mono 16-bit PCM WAV to `output`
    fn to_waveform(&self, input: &Path, output: &Path) -> Result<()>;
}

pub struct SymphoniaTranscoder {
    target_rate: u32,
}

impl Default for SymphoniaTranscoder {
    fn default() -> Self {
        Self::new(SPEECH_SAMPLE_RATE)
    }
}

impl SymphoniaTranscoder {
    pub fn new(target_rate: u32) -> Self {
        Self { target_rate }
    }

    /// Decode the first audio track to mono f32 samples
    fn decode_mono(&self, input: &Path) -> Result<(Vec<f32>, u32)> {
        let file = File::open(input)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = input.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;
        let mut format = probed.format;

        // Video tracks carry no sample rate, which skips them
        let track = format
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL && t.codec_params.sample_rate.is_some())
            .ok_or_else(|| AnalyzerError::Transcoding("No audio track found".to_string()))?;

        let track_id = track.id;
        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| AnalyzerError::Transcoding("Sample rate not found".to_string()))?;
        let mut decoder = symphonia::default::get_codecs()
            .make(&track.codec_params, &DecoderOptions::default())?;

        let mut samples = Vec::new();
        loop {
            let packet = match format.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::IoError(ref e))
                    if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                {
                    break;
                }
                Err(SymphoniaError::ResetRequired) => break,
                Err(e) => return Err(e.into()),
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => {
                    let spec = *decoded.spec();
                    let channels = spec.channels.count().max(1);
                    let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
                    buffer.copy_interleaved_ref(decoded);
                    samples.extend(
                        buffer
                            .samples()
                            .chunks(channels)
                            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32),
                    );
                }
                Err(SymphoniaError::DecodeError(e)) => {
                    warn!("Skipping undecodable packet: {}", e);
                }
                Err(e) => return Err(e.into()),
            }
        }

        debug!(
            "Decoded {} mono samples at {} Hz from {}",
            samples.len(),
            sample_rate,
            input.display()
        );
        Ok((samples, sample_rate))
    }
}

impl Transcoder for SymphoniaTranscoder {
    fn to_waveform(&self, input: &Path, output: &Path) -> Result<()> {
        let (samples, source_rate) = self.decode_mono(input)?;
        if samples.is_empty() {
            return Err(AnalyzerError::Transcoding(format!(
                "No audio decoded from {}",
                input.display()
            )));
        }

        let resampled = resample_linear(&samples, source_rate, self.target_rate);

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: self.target_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(output, spec)?;
        for sample in resampled {
            writer.write_sample((sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16)?;
        }
        writer.finalize()?;
        Ok(())
    }
}

/// Linear-interpolation resampling of a mono signal
pub fn resample_linear(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() || from_rate == 0 || to_rate == 0 {
        return samples.to_vec();
    }

    let step = f64::from(from_rate) / f64::from(to_rate);
    let output_len = (samples.len() as f64 / step).round().max(1.0) as usize;
    let last = samples.len() - 1;

    (0..output_len)
        .map(|i| {
            let position = i as f64 * step;
            let index = (position.floor() as usize).min(last);
            let fraction = (position - index as f64) as f32;
            let current = samples[index];
            let next = samples[(index + 1).min(last)];
            current + (next - current) * fraction
        })
        .collect()
}

/// Converts audio and video uploads into transcripts
pub struct MediaExtractor {
    transcoder: Box<dyn Transcoder>,
    recognizer: Box<dyn SpeechRecognizer>,
    scratch_root: Option<PathBuf>,
}

impl MediaExtractor {
    pub fn new(transcoder: Box<dyn Transcoder>, recognizer: Box<dyn SpeechRecognizer>) -> Self {
        Self {
            transcoder,
            recognizer,
            scratch_root: None,
        }
    }

    /// Place scratch directories under `root` instead of the system temp dir
    pub fn with_scratch_root(mut self, root: PathBuf) -> Self {
        self.scratch_root = Some(root);
        self
    }

    fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("meeting-analyzer-");
        let dir = match &self.scratch_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }

    pub fn transcribe_audio(&self, bytes: &[u8], format: AudioFormat) -> Result<String> {
        let scratch = self.scratch_dir()?;
        let input = scratch.path().join(format!("input.{}", format.extension()));
        let waveform = scratch.path().join("speech.wav");
        fs::write(&input, bytes)?;

        info!("Transcoding {} bytes of {} audio", bytes.len(), format.extension());
        self.transcoder.to_waveform(&input, &waveform)?;

        info!("Running speech recognition");
        self.recognizer.transcribe(&waveform)
    }

    pub fn transcribe_video(&self, bytes: &[u8], format: VideoFormat) -> Result<String> {
        let scratch = self.scratch_dir()?;
        let input = scratch.path().join(format!("input.{}", format.extension()));
        let soundtrack = scratch.path().join("soundtrack.wav");
        fs::write(&input, bytes)?;

        info!("Extracting audio track from {} video", format.extension());
        self.transcoder.to_waveform(&input, &soundtrack)?;

        let audio = fs::read(&soundtrack)?;
        self.transcribe_audio(&audio, AudioFormat::Wav)
    }
}
