pub mod clock;
pub mod error;
pub mod locate;
pub mod lrc;
pub mod session;
pub mod settings;
pub mod source;
pub mod track;
pub mod util;

mod logic;
pub use logic::{Logic, LogicArgs, SKIP_STEP_SECS};

mod tokio_thread;

pub use lyricsync_netease as ne;

pub use clock::{ClockState, PlaybackClock};
pub use error::{SyncError, SyncStatus};
pub use lrc::{LyricLine, Timeline};
pub use session::{SessionEvent, SessionEventRx, TrackChange, TrackSession};
pub use settings::SyncSettings;
pub use source::TrackSource;
pub use track::{TrackId, TrackIdentity};
