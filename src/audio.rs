//! Sound cues and background music.
//!
//! Playback goes through rodio when the `audio` feature is enabled. Missing
//! files, undecodable files and absent output devices are logged and the
//! game carries on without that sound.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::sink::Cue;

const BACKGROUND_MUSIC: &str = "bg_music.mp3";

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[allow(dead_code)]
    #[error("cannot decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },
    #[allow(dead_code)]
    #[error("audio output unavailable: {0}")]
    Device(String),
    #[allow(dead_code)]
    #[error("built without audio support")]
    Unsupported,
}

impl Cue {
    pub fn file_name(self) -> &'static str {
        match self {
            Cue::Ding => "ding.mp3",
            Cue::Crash => "crash.mp3",
        }
    }
}

pub struct Audio {
    dir: PathBuf,
    backend: Option<backend::Backend>,
}

impl Audio {
    /// Opens the default output device unless `muted`. Without a device the
    /// returned value plays nothing.
    pub fn new(dir: impl Into<PathBuf>, muted: bool) -> Self {
        let dir = dir.into();

        let backend = if muted {
            debug!("Audio muted");
            None
        } else {
            match backend::Backend::open() {
                Ok(backend) => Some(backend),
                Err(e) => {
                    warn!("Continuing without sound: {}", e);
                    None
                }
            }
        };

        Audio { dir, backend }
    }

    #[cfg(test)]
    pub fn silent(dir: impl Into<PathBuf>) -> Self {
        Audio { dir: dir.into(), backend: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn play_cue(&self, cue: Cue) {
        if let Err(e) = self.try_play(cue.file_name(), false) {
            warn!("Sound {:?} not played: {}", cue, e);
        }
    }

    pub fn play_background_loop(&self) {
        if let Err(e) = self.try_play(BACKGROUND_MUSIC, true) {
            warn!("Background music not played: {}", e);
        }
    }

    pub fn try_play(&self, name: &str, looped: bool) -> Result<(), AudioError> {
        let backend = match &self.backend {
            Some(backend) => backend,
            None => {
                debug!("No audio output, skipping {}", name);
                return Ok(());
            }
        };

        let path = self.dir.join(name);
        let file = open(&path)?;
        backend.play(&path, file, looped)
    }
}

pub fn open(path: &Path) -> Result<File, AudioError> {
    File::open(path).map_err(|source| AudioError::Open { path: path.to_path_buf(), source })
}

#[cfg(feature = "audio")]
mod backend {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

    use super::AudioError;

    pub struct Backend {
        _stream: OutputStream,
        handle: OutputStreamHandle,
    }

    impl Backend {
        pub fn open() -> Result<Self, AudioError> {
            let (stream, handle) =
                OutputStream::try_default().map_err(|e| AudioError::Device(e.to_string()))?;
            Ok(Backend { _stream: stream, handle })
        }

        /// Starts playback and returns at once; the sink is detached.
        pub fn play(&self, path: &Path, file: File, looped: bool) -> Result<(), AudioError> {
            let source = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
            let sink = Sink::try_new(&self.handle).map_err(|e| AudioError::Device(e.to_string()))?;

            if looped {
                sink.append(source.repeat_infinite());
            } else {
                sink.append(source);
            }

            sink.detach();
            Ok(())
        }
    }
}

#[cfg(not(feature = "audio"))]
mod backend {
    use std::fs::File;
    use std::path::Path;

    use super::AudioError;

    pub struct Backend;

    impl Backend {
        pub fn open() -> Result<Self, AudioError> {
            Err(AudioError::Unsupported)
        }

        pub fn play(&self, _path: &Path, _file: File, _looped: bool) -> Result<(), AudioError> {
            Err(AudioError::Unsupported)
        }
    }
}
