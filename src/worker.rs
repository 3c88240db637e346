//! Background work posted back to the UI thread
//!
//! Workers only send `WorkerMessage`s; the event loop drains them once per
//! tick and applies them itself.

use std::path::PathBuf;
use std::thread;

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::i18n::Localization;

#[derive(Debug)]
pub enum WorkerMessage {
    /// A language file finished loading
    TranslationsLoaded(Localization),
}

/// UI side of the worker channel.
pub struct Mailbox {
    tx: Sender<WorkerMessage>,
    rx: Receiver<WorkerMessage>,
}

impl Default for Mailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl Mailbox {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<WorkerMessage> {
        self.tx.clone()
    }

    /// Everything posted since the last drain, in send order.
    pub fn drain(&self) -> Vec<WorkerMessage> {
        let mut messages = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(message) => messages.push(message),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        messages
    }

    /// Load the table for `language` on a worker thread.
    pub fn spawn_language_load(&self, lang_dir: PathBuf, language: String) {
        let tx = self.sender();
        let spawned = thread::Builder::new()
            .name("lang-loader".into())
            .spawn(move || {
                let l10n = Localization::load(&lang_dir, &language);
                if tx.send(WorkerMessage::TranslationsLoaded(l10n)).is_err() {
                    log::debug!("language load finished after the UI went away");
                }
            });
        if let Err(err) = spawned {
            log::warn!("cannot start language loader: {}", err);
        }
    }
}
