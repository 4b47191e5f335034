//! Built-in speech engine
//!
//! The narrator walks the text word by word at a fixed pace, reporting each
//! word boundary on the event channel. When a voice command is configured it
//! also pipes the remaining text to that command, so an external synthesizer
//! (espeak-ng, say, piper) produces the audio. Pausing kills the command and
//! resuming starts it again from the current word.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};
use tokio::sync::{mpsc, watch};
use tokio_util::sync::CancellationToken;

use super::words::{self, WordSpan};
use super::{SpeechEngine, SpeechEvent, UtteranceId};

/// Default narration pace
pub const DEFAULT_WORDS_PER_MINUTE: u32 = 170;

/// Placeholder in voice command arguments replaced by the locale
const LOCALE_PLACEHOLDER: &str = "{locale}";

/// Handle to the utterance currently playing
#[derive(Debug)]
struct ActiveUtterance {
    id: UtteranceId,
    cancel: CancellationToken,
    paused: watch::Sender<bool>,
}

/// Paced narration engine
#[derive(Debug)]
pub struct Narrator {
    events: mpsc::UnboundedSender<SpeechEvent>,
    words_per_minute: u32,
    voice_command: Option<Vec<String>>,
    next_id: UtteranceId,
    active: Option<ActiveUtterance>,
}

impl Narrator {
    /// Create a narrator that reports on `events`
    pub fn new(events: mpsc::UnboundedSender<SpeechEvent>) -> Self {
        Self {
            events,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            voice_command: None,
            next_id: 0,
            active: None,
        }
    }

    /// Set the narration pace
    pub fn with_words_per_minute(mut self, words_per_minute: u32) -> Self {
        self.words_per_minute = words_per_minute.max(1);
        self
    }

    /// Pipe narrated text to an external command (program followed by args)
    pub fn with_voice_command(mut self, command: Option<Vec<String>>) -> Self {
        self.voice_command = command.filter(|c| !c.is_empty());
        self
    }

    /// Time spent on each word
    fn word_delay(&self) -> Duration {
        Duration::from_millis(60_000 / u64::from(self.words_per_minute))
    }
}

impl SpeechEngine for Narrator {
    fn speak(&mut self, text: &str, locale: &str) -> UtteranceId {
        self.cancel();

        self.next_id += 1;
        let id = self.next_id;
        let cancel = CancellationToken::new();
        let (paused_tx, paused_rx) = watch::channel(false);

        let job = Narration {
            id,
            text: text.to_string(),
            locale: locale.to_string(),
            word_delay: self.word_delay(),
            voice_command: self.voice_command.clone(),
            events: self.events.clone(),
        };
        tokio::spawn(job.run(cancel.clone(), paused_rx));

        tracing::debug!("Started utterance {} ({} chars, {})", id, text.chars().count(), locale);
        self.active = Some(ActiveUtterance { id, cancel, paused: paused_tx });
        id
    }

    fn pause(&mut self) {
        if let Some(active) = &self.active {
            let _ = active.paused.send(true);
        }
    }

    fn resume(&mut self) {
        if let Some(active) = &self.active {
            let _ = active.paused.send(false);
        }
    }

    fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            tracing::debug!("Cancelling utterance {}", active.id);
            active.cancel.cancel();
        }
    }
}

impl Drop for Narrator {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One utterance being narrated on its own task
struct Narration {
    id: UtteranceId,
    text: String,
    locale: String,
    word_delay: Duration,
    voice_command: Option<Vec<String>>,
    events: mpsc::UnboundedSender<SpeechEvent>,
}

/// Why a wait was interrupted
enum Interrupt {
    Cancelled,
    Paused,
}

/// What ended the wait for the voice command after the last word
enum Tail {
    Exited(std::io::Result<std::process::ExitStatus>),
    /// False once the pause sender is gone
    PauseChanged(bool),
}

impl Narration {
    async fn run(self, cancel: CancellationToken, mut paused: watch::Receiver<bool>) {
        let words = words::tokenize(&self.text);
        let mut voice: Option<Child> = None;
        let mut index = 0;

        while let Some(word) = words.get(index) {
            if cancel.is_cancelled() {
                return;
            }

            if *paused.borrow() {
                stop_voice(&mut voice).await;
                if !wait_for_resume(&cancel, &mut paused).await {
                    return;
                }
            }

            if voice.is_none() && !self.start_voice(word, &mut voice) {
                return;
            }

            if !self.emit(SpeechEvent::Boundary { utterance: self.id, char_index: word.start }) {
                return;
            }

            let delay = self.word_delay + pause_after(word.text(&self.text), self.word_delay);
            match hold(delay, &cancel, &mut paused).await {
                None => index += 1,
                Some(Interrupt::Cancelled) => return,
                // Stay on this word so it is spoken again after resuming
                Some(Interrupt::Paused) => {
                    stop_voice(&mut voice).await;
                    if !wait_for_resume(&cancel, &mut paused).await {
                        return;
                    }
                }
            }
        }

        // Let the synthesizer finish speaking before reporting the end
        while let Some(child) = voice.as_mut() {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => return,
                status = child.wait() => Tail::Exited(status),
                changed = paused.changed() => Tail::PauseChanged(changed.is_ok()),
            };

            match outcome {
                Tail::Exited(status) => {
                    if let Ok(status) = status {
                        if !status.success() {
                            tracing::warn!("Voice command exited with {}", status);
                        }
                    }
                    break;
                }
                Tail::PauseChanged(false) => return,
                Tail::PauseChanged(true) => {
                    if !*paused.borrow() {
                        continue;
                    }
                    stop_voice(&mut voice).await;
                    if !wait_for_resume(&cancel, &mut paused).await {
                        return;
                    }
                    if let Some(last) = words.last() {
                        if !self.start_voice(last, &mut voice) {
                            return;
                        }
                    }
                }
            }
        }

        self.emit(SpeechEvent::End { utterance: self.id });
    }

    /// Spawn the voice command from `word` if one is configured; false after reporting a failure
    fn start_voice(&self, word: &WordSpan, voice: &mut Option<Child>) -> bool {
        let Some(command) = &self.voice_command else {
            return true;
        };
        match self.spawn_voice(command, word) {
            Ok(child) => {
                *voice = Some(child);
                true
            }
            Err(e) => {
                self.emit(SpeechEvent::Error {
                    utterance: self.id,
                    reason: format!("failed to start voice command: {}", e),
                });
                false
            }
        }
    }

    /// Start the voice command reading from `word` to the end of the text
    fn spawn_voice(&self, command: &[String], word: &WordSpan) -> std::io::Result<Child> {
        let (program, args) = command.split_first().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty voice command")
        })?;

        let args = args.iter().map(|arg| arg.replace(LOCALE_PLACEHOLDER, &self.locale));
        Command::new(program)
            .args(args)
            .arg(&self.text[word.byte_start..])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
    }

    /// Send an event, returning false once nobody is listening
    fn emit(&self, event: SpeechEvent) -> bool {
        self.events.send(event).is_ok()
    }
}

/// Extra time to linger after punctuation
fn pause_after(word: &str, word_delay: Duration) -> Duration {
    match word.chars().last() {
        Some('.' | '!' | '?' | ';' | ':') => word_delay,
        Some(',') => word_delay / 2,
        _ => Duration::ZERO,
    }
}

/// Sleep for `delay` unless cancelled or paused first
async fn hold(
    delay: Duration,
    cancel: &CancellationToken,
    paused: &mut watch::Receiver<bool>,
) -> Option<Interrupt> {
    let sleep = tokio::time::sleep(delay);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Some(Interrupt::Cancelled),
            _ = &mut sleep => return None,
            changed = paused.changed() => {
                if changed.is_err() {
                    return Some(Interrupt::Cancelled);
                }
                if *paused.borrow() {
                    return Some(Interrupt::Paused);
                }
            }
        }
    }
}

/// Block until resumed; false if cancelled meanwhile
async fn wait_for_resume(cancel: &CancellationToken, paused: &mut watch::Receiver<bool>) -> bool {
    while *paused.borrow() {
        tokio::select! {
            _ = cancel.cancelled() => return false,
            changed = paused.changed() => {
                if changed.is_err() {
                    return false;
                }
            }
        }
    }
    !cancel.is_cancelled()
}

async fn stop_voice(voice: &mut Option<Child>) {
    if let Some(mut child) = voice.take() {
        if let Err(e) = child.kill().await {
            tracing::debug!("Voice command already gone: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn next_event(rx: &mut mpsc::UnboundedReceiver<SpeechEvent>) -> SpeechEvent {
        tokio::time::timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for speech event")
            .expect("channel closed")
    }

    #[tokio::test]
    async fn narrates_every_word_then_ends() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut narrator = Narrator::new(tx).with_words_per_minute(60_000);

        let id = narrator.speak("one two three", "en-US");

        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 0 });
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 4 });
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 8 });
        assert_eq!(next_event(&mut rx).await, SpeechEvent::End { utterance: id });
    }

    #[tokio::test]
    async fn cancel_before_start_emits_nothing() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut narrator = Narrator::new(tx);

        narrator.speak("never heard", "en-US");
        narrator.cancel();
        drop(narrator);

        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn new_utterance_gets_new_id() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut narrator = Narrator::new(tx);

        let first = narrator.speak("a", "en-US");
        let second = narrator.speak("b", "en-US");
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn pause_holds_position_until_resume() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut narrator = Narrator::new(tx).with_words_per_minute(600);

        let id = narrator.speak("alpha beta", "en-US");
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 0 });

        narrator.pause();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.try_recv().is_err());

        narrator.resume();
        // The interrupted word is read again before moving on
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 0 });
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 6 });
        assert_eq!(next_event(&mut rx).await, SpeechEvent::End { utterance: id });
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn pause_stops_voice_before_the_end() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        // `sleep 1` stands in for a synthesizer still reading the last word
        let mut narrator = Narrator::new(tx)
            .with_words_per_minute(60_000)
            .with_voice_command(Some(vec!["sleep".to_string()]));

        let id = narrator.speak("1", "en-US");
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 0 });

        tokio::time::sleep(Duration::from_millis(100)).await;
        narrator.pause();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(rx.try_recv().is_err(), "no end while paused");

        narrator.resume();
        assert_eq!(next_event(&mut rx).await, SpeechEvent::End { utterance: id });
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn pause_mid_word_with_voice_resumes_on_that_word() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut narrator = Narrator::new(tx)
            .with_words_per_minute(600)
            .with_voice_command(Some(vec!["sleep".to_string()]));

        let id = narrator.speak("0 0", "en-US");
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 0 });

        narrator.pause();
        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(rx.try_recv().is_err());

        narrator.resume();
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 0 });
        assert_eq!(next_event(&mut rx).await, SpeechEvent::Boundary { utterance: id, char_index: 2 });
        assert_eq!(next_event(&mut rx).await, SpeechEvent::End { utterance: id });
    }

    #[tokio::test]
    async fn missing_voice_command_reports_error() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut narrator = Narrator::new(tx)
            .with_voice_command(Some(vec!["clio-no-such-voice-binary".to_string()]));

        let id = narrator.speak("hello", "en-US");
        match next_event(&mut rx).await {
            SpeechEvent::Error { utterance, .. } => assert_eq!(utterance, id),
            other => panic!("expected error, got {:?}", other),
        }
    }

    #[test]
    fn empty_voice_command_is_ignored() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let narrator = Narrator::new(tx).with_voice_command(Some(Vec::new()));
        assert!(narrator.voice_command.is_none());
    }

    #[test]
    fn punctuation_lengthens_delay() {
        let delay = Duration::from_millis(100);
        assert_eq!(pause_after("end.", delay), delay);
        assert_eq!(pause_after("list,", delay), delay / 2);
        assert_eq!(pause_after("word", delay), Duration::ZERO);
    }

    #[test]
    fn pace_is_never_zero() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let narrator = Narrator::new(tx).with_words_per_minute(0);
        assert_eq!(narrator.word_delay(), Duration::from_secs(60));
    }
}
