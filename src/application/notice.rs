//! Temporary on-page notices.
//!
//! Notices (e.g. "message sent") stay visible for a fixed time and are
//! then removed by a task on the [`Scheduler`].

use crate::application::ports::{Scheduler, TimerHandle};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tracing::debug;

/// Text of the notice shown after the contact form is sent.
pub const SUCCESS_NOTICE: &str = "Message sent successfully! We'll get back to you soon.";

/// Default time a notice stays on screen.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(5);

/// Visual flavour of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    /// Green confirmation
    Success,
    /// Error banner
    Error,
}

/// A notice currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Identifier returned by [`NoticeBoard::post`]
    pub id: u64,
    /// Flavour
    pub kind: NoticeKind,
    /// Text to display
    pub text: String,
}

#[derive(Debug, Default)]
struct Board {
    next_id: u64,
    notices: Vec<Notice>,
    timers: Vec<(u64, Box<dyn TimerHandle>)>,
}

impl Board {
    fn remove(&mut self, id: u64) -> Option<Box<dyn TimerHandle>> {
        self.notices.retain(|notice| notice.id != id);
        let position = self.timers.iter().position(|(timer_id, _)| *timer_id == id)?;
        Some(self.timers.swap_remove(position).1)
    }
}

fn lock(board: &Mutex<Board>) -> MutexGuard<'_, Board> {
    board.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Holds the notices currently on screen and expires them.
#[derive(Debug, Clone)]
pub struct NoticeBoard {
    scheduler: Arc<dyn Scheduler>,
    ttl: Duration,
    board: Arc<Mutex<Board>>,
}

impl NoticeBoard {
    /// Create a board whose notices last `ttl`.
    pub fn new(scheduler: Arc<dyn Scheduler>, ttl: Duration) -> Self {
        Self {
            scheduler,
            ttl,
            board: Arc::new(Mutex::new(Board::default())),
        }
    }

    /// Time each notice stays visible.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Show a notice; returns its id.
    pub fn post(&self, kind: NoticeKind, text: impl Into<String>) -> u64 {
        let mut board = lock(&self.board);
        let id = board.next_id;
        board.next_id += 1;
        board.notices.push(Notice {
            id,
            kind,
            text: text.into(),
        });

        let weak: Weak<Mutex<Board>> = Arc::downgrade(&self.board);
        let timer = self.scheduler.schedule(
            self.ttl,
            Box::new(move || {
                if let Some(board) = weak.upgrade() {
                    lock(&board).remove(id);
                    debug!(id, "notice expired");
                }
            }),
        );
        board.timers.push((id, timer));
        id
    }

    /// Show the standard "message sent" confirmation.
    pub fn success(&self) -> u64 {
        self.post(NoticeKind::Success, SUCCESS_NOTICE)
    }

    /// Remove a notice before it expires. Returns whether it was visible.
    pub fn dismiss(&self, id: u64) -> bool {
        let mut board = lock(&self.board);
        let visible = board.notices.iter().any(|notice| notice.id == id);
        if let Some(timer) = board.remove(id) {
            timer.cancel();
        }
        visible
    }

    /// Notices currently on screen, oldest first.
    pub fn visible(&self) -> Vec<Notice> {
        lock(&self.board).notices.clone()
    }
}
