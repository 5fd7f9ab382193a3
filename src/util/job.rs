// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Background jobs polled from the UI thread.
//!
//! Each job runs on its own thread and reports through a channel. A job
//! carries a [`CancellationToken`]; once cancelled, its result is dropped
//! on the worker side and never reaches the UI.

use super::cancel::CancellationToken;
use std::sync::mpsc::{channel, Receiver, TryRecvError};

/// Outcome of polling a finished job.
pub enum Finished<T> {
    Done(T),
    /// The worker went away without a result (cancelled or panicked)
    Lost,
}

pub struct PendingJob<T> {
    token: CancellationToken,
    receiver: Receiver<T>,
    message: String,
}

impl<T: Send + 'static> PendingJob<T> {
    /// Run `work` on a new thread.
    ///
    /// The closure receives the job's token so long-running work can bail
    /// out early, e.g. before writing a file.
    pub fn spawn<F>(message: impl Into<String>, work: F) -> Self
    where
        F: FnOnce(&CancellationToken) -> T + Send + 'static,
    {
        let token = CancellationToken::new();
        let (sender, receiver) = channel();
        let message = message.into();

        let worker_token = token.clone();
        let worker_message = message.clone();
        std::thread::spawn(move || {
            let result = work(&worker_token);
            if worker_token.is_cancelled() {
                log::debug!("Discarding result of cancelled job: {}", worker_message);
                return;
            }
            let _ = sender.send(result);
        });

        Self {
            token,
            receiver,
            message,
        }
    }
}

impl<T> PendingJob<T> {
    /// Progress message shown while the job runs.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Take the job out of `slot` if it has finished.
    pub fn take_finished(slot: &mut Option<Self>) -> Option<Finished<T>> {
        let polled = match slot.as_ref()?.receiver.try_recv() {
            Ok(value) => Finished::Done(value),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Finished::Lost,
        };
        *slot = None;
        Some(polled)
    }
}
