/// Named sound cues and the players that voice them
use std::io::{stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Correct,
    Incorrect,
    WordGuessed,
    WordNotGuessed,
}

impl SoundCue {
    /// Asset name, also the file stem looked up in the assets directory
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Correct => "correct",
            SoundCue::Incorrect => "incorrect",
            SoundCue::WordGuessed => "word-guessed",
            SoundCue::WordNotGuessed => "word-not-guessed",
        }
    }
}

/// How cues are voiced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SoundMode {
    Off,
    /// Terminal bell on penalties and misses
    #[default]
    Bell,
    /// `<assets>/<cue>.wav`, needs the `audio` feature
    Assets,
}

/// Plays cues. A cue that cannot be played is skipped, never reported as an error.
pub trait CuePlayer {
    fn play(&mut self, cue: SoundCue);
}

#[derive(Debug, Default)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

#[derive(Debug, Default)]
pub struct TerminalBell;

impl CuePlayer for TerminalBell {
    fn play(&mut self, cue: SoundCue) {
        if matches!(cue, SoundCue::Incorrect | SoundCue::WordNotGuessed) {
            let mut out = stdout();
            let _ = out.write_all(b"\x07");
            let _ = out.flush();
        }
    }
}

/// Remembers every cue it was asked to play. Shared handle, so clones see the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingPlayer {
    played: Arc<Mutex<Vec<SoundCue>>>,
}

impl RecordingPlayer {
    pub fn played(&self) -> Vec<SoundCue> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl CuePlayer for RecordingPlayer {
    fn play(&mut self, cue: SoundCue) {
        if let Ok(mut played) = self.played.lock() {
            played.push(cue);
        }
    }
}

/// Path of the asset backing `cue`
pub fn asset_path(dir: &Path, cue: SoundCue) -> PathBuf {
    dir.join(format!("{}.wav", cue.name()))
}

/// Builds the player for `mode`. Falls back to silence when the assets player is unavailable.
pub fn build_player(mode: SoundMode, assets_dir: &Path) -> Box<dyn CuePlayer> {
    match mode {
        SoundMode::Off => Box::new(Silent),
        SoundMode::Bell => Box::new(TerminalBell),
        SoundMode::Assets => assets_player(assets_dir),
    }
}

#[cfg(feature = "audio")]
fn assets_player(assets_dir: &Path) -> Box<dyn CuePlayer> {
    match rodio_player::AssetPlayer::new(assets_dir) {
        Ok(player) => Box::new(player),
        Err(e) => {
            warn!(error = %e, "no audio device; sound disabled");
            Box::new(Silent)
        }
    }
}

#[cfg(not(feature = "audio"))]
fn assets_player(assets_dir: &Path) -> Box<dyn CuePlayer> {
    warn!(dir = %assets_dir.display(), "built without the `audio` feature; sound disabled");
    Box::new(Silent)
}

#[cfg(feature = "audio")]
mod rodio_player {
    use super::{asset_path, CuePlayer, SoundCue};
    use anyhow::{Context as _, Result};
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};
    use tracing::warn;

    pub struct AssetPlayer {
        dir: PathBuf,
        _stream: OutputStream,
        handle: OutputStreamHandle,
        current: Option<Sink>,
    }

    impl AssetPlayer {
        pub fn new(dir: &Path) -> Result<Self> {
            let (stream, handle) = OutputStream::try_default().context("opening audio output")?;
            Ok(Self {
                dir: dir.to_path_buf(),
                _stream: stream,
                handle,
                current: None,
            })
        }

        fn start(&self, cue: SoundCue) -> Result<Sink> {
            let path = asset_path(&self.dir, cue);
            let file = File::open(&path).with_context(|| format!("opening {}", path.display()))?;
            let source = Decoder::new(BufReader::new(file)).context("decoding sound")?;
            let sink = Sink::try_new(&self.handle).context("creating sink")?;
            sink.append(source);
            Ok(sink)
        }
    }

    impl CuePlayer for AssetPlayer {
        fn play(&mut self, cue: SoundCue) {
            // one cue at a time
            if let Some(previous) = self.current.take() {
                previous.stop();
            }

            match self.start(cue) {
                Ok(sink) => self.current = Some(sink),
                Err(e) => warn!(cue = cue.name(), error = %e, "skipping sound cue"),
            }
        }
    }
}
