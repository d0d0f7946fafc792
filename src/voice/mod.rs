pub mod tts;

pub use tts::{Announcer, SilentAnnouncer, TtsConfig, TtsManager};
