//! Text-to-speech playback.
//!
//! Speech is a pass-through to whatever engine the platform offers. Failures
//! surface as `SpeechError::PlaybackUnavailable` and never touch progress.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use daily_core::model::SentenceRecord;
use tokio::process::Command;

use crate::error::SpeechError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageTag {
    EnglishUs,
    TeluguIn,
}

impl LanguageTag {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LanguageTag::EnglishUs => "en-US",
            LanguageTag::TeluguIn => "te-IN",
        }
    }

    /// Voice name understood by `espeak-ng`.
    fn espeak_voice(self) -> &'static str {
        match self {
            LanguageTag::EnglishUs => "en-us",
            LanguageTag::TeluguIn => "te",
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rate and pitch relative to the engine's normal voice (1.0).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeechSettings {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate: 0.8,
            pitch: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub language: LanguageTag,
    pub rate: f32,
    pub pitch: f32,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak `request.text`.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::PlaybackUnavailable` when no engine can play it.
    async fn speak(&self, request: &SpeechRequest) -> Result<(), SpeechError>;
}

/// Words per minute of a typical engine voice at rate 1.0.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

fn words_per_minute(rate: f32) -> u32 {
    // Float-to-int `as` saturates; the clamp keeps the engines in a sane range.
    (BASE_WORDS_PER_MINUTE * rate).round().clamp(80.0, 450.0) as u32
}

pub(crate) fn say_args(request: &SpeechRequest) -> Vec<String> {
    vec![
        "-r".to_string(),
        words_per_minute(request.rate).to_string(),
        "--".to_string(),
        request.text.clone(),
    ]
}

pub(crate) fn espeak_args(request: &SpeechRequest) -> Vec<String> {
    // espeak-ng pitch runs 0..=99 with 50 as normal.
    let pitch = (request.pitch * 50.0).round().clamp(0.0, 99.0) as u32;
    vec![
        "-v".to_string(),
        request.language.espeak_voice().to_string(),
        "-s".to_string(),
        words_per_minute(request.rate).to_string(),
        "-p".to_string(),
        pitch.to_string(),
        "--".to_string(),
        request.text.clone(),
    ]
}

/// System.Speech rate runs -10..=10 with 0 as normal.
pub(crate) fn powershell_rate(rate: f32) -> i32 {
    ((rate - 1.0) * 10.0).round().clamp(-10.0, 10.0) as i32
}

const POWERSHELL_SCRIPT: &str = "Add-Type -AssemblyName System.Speech; \
     $s = New-Object System.Speech.Synthesis.SpeechSynthesizer; \
     $s.Rate = [int]$env:DAILY_SPEECH_RATE; \
     $s.Speak($env:DAILY_SPEECH_TEXT)";

/// Speaks through the engine shipped with the operating system.
///
/// macOS uses `say`, Linux uses `espeak-ng`, Windows uses System.Speech via PowerShell.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemSpeech;

impl SystemSpeech {
    fn command_for(request: &SpeechRequest) -> Option<Command> {
        if cfg!(target_os = "macos") {
            let mut command = Command::new("say");
            command.args(say_args(request));
            Some(command)
        } else if cfg!(target_os = "linux") {
            let mut command = Command::new("espeak-ng");
            command.args(espeak_args(request));
            Some(command)
        } else if cfg!(target_os = "windows") {
            let mut command = Command::new("powershell");
            command
                .args(["-NoProfile", "-Command", POWERSHELL_SCRIPT])
                .env("DAILY_SPEECH_TEXT", &request.text)
                .env("DAILY_SPEECH_RATE", powershell_rate(request.rate).to_string());
            Some(command)
        } else {
            None
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for SystemSpeech {
    async fn speak(&self, request: &SpeechRequest) -> Result<(), SpeechError> {
        if request.text.trim().is_empty() {
            return Ok(());
        }
        let mut command = Self::command_for(request).ok_or_else(|| {
            SpeechError::PlaybackUnavailable("no speech engine for this platform".into())
        })?;

        let status = command
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| SpeechError::PlaybackUnavailable(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::PlaybackUnavailable(format!(
                "speech engine exited with {status}"
            )))
        }
    }
}

/// Speech switched off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpeech;

#[async_trait]
impl SpeechSynthesizer for NoSpeech {
    async fn speak(&self, _request: &SpeechRequest) -> Result<(), SpeechError> {
        Err(SpeechError::PlaybackUnavailable("speech is disabled".into()))
    }
}

/// Builds speech requests for sentence cards.
#[derive(Clone)]
pub struct SpeechService {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    settings: SpeechSettings,
}

impl SpeechService {
    #[must_use]
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, settings: SpeechSettings) -> Self {
        Self {
            synthesizer,
            settings,
        }
    }

    #[must_use]
    pub fn request(&self, text: &str, language: LanguageTag) -> SpeechRequest {
        SpeechRequest {
            text: text.to_owned(),
            language,
            rate: self.settings.rate,
            pitch: self.settings.pitch,
        }
    }

    /// # Errors
    ///
    /// Returns `SpeechError::PlaybackUnavailable` if the engine cannot play it.
    pub async fn speak(&self, text: &str, language: LanguageTag) -> Result<(), SpeechError> {
        let request = self.request(text, language);
        self.synthesizer.speak(&request).await.inspect_err(|err| {
            log::warn!("speech playback failed ({language}): {err}");
        })
    }

    /// Read the sentence in the language being learned.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::PlaybackUnavailable` if the engine cannot play it.
    pub async fn speak_source(&self, sentence: &SentenceRecord) -> Result<(), SpeechError> {
        self.speak(sentence.source_text(), LanguageTag::TeluguIn).await
    }

    /// Read the English translation.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::PlaybackUnavailable` if the engine cannot play it.
    pub async fn speak_english(&self, sentence: &SentenceRecord) -> Result<(), SpeechError> {
        self.speak(sentence.english_text(), LanguageTag::EnglishUs).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use daily_core::model::SentenceId;

    #[derive(Default)]
    struct RecordingSpeech {
        requests: Mutex<Vec<SpeechRequest>>,
    }

    #[async_trait]
    impl SpeechSynthesizer for RecordingSpeech {
        async fn speak(&self, request: &SpeechRequest) -> Result<(), SpeechError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(())
        }
    }

    fn sentence() -> SentenceRecord {
        SentenceRecord::new(SentenceId::new(0), "నమస్కారం", "Hello").unwrap()
    }

    #[tokio::test]
    async fn sides_use_their_language_tags() {
        let recorder = Arc::new(RecordingSpeech::default());
        let service = SpeechService::new(recorder.clone(), SpeechSettings::default());

        service.speak_source(&sentence()).await.unwrap();
        service.speak_english(&sentence()).await.unwrap();

        let requests = recorder.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].language.as_str(), "te-IN");
        assert_eq!(requests[0].text, "నమస్కారం");
        assert_eq!(requests[1].language.as_str(), "en-US");
        assert!((requests[1].rate - 0.8).abs() < f32::EPSILON);
        assert!((requests[1].pitch - 1.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn disabled_speech_reports_unavailable() {
        let service = SpeechService::new(Arc::new(NoSpeech), SpeechSettings::default());
        let err = service.speak_english(&sentence()).await.unwrap_err();
        assert!(matches!(err, SpeechError::PlaybackUnavailable(_)));
    }

    #[tokio::test]
    async fn system_speech_skips_blank_text() {
        let request = SpeechService::new(Arc::new(SystemSpeech), SpeechSettings::default())
            .request("   ", LanguageTag::EnglishUs);
        assert!(SystemSpeech.speak(&request).await.is_ok());
    }

    #[test]
    fn engine_arguments_scale_rate_and_pitch() {
        let request = SpeechRequest {
            text: "-n not a flag".into(),
            language: LanguageTag::TeluguIn,
            rate: 0.8,
            pitch: 1.0,
        };
        assert_eq!(
            espeak_args(&request),
            vec!["-v", "te", "-s", "140", "-p", "50", "--", "-n not a flag"]
        );
        assert_eq!(say_args(&request), vec!["-r", "140", "--", "-n not a flag"]);
        assert_eq!(powershell_rate(0.8), -2);
        assert_eq!(powershell_rate(5.0), 10);
    }
}
