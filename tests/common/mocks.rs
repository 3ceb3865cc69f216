//! Recording stand-in for the file write primitive.
use std::{
    collections::HashSet,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use csv_writer_rs::core::file::{FileWriter, WriteMode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteCall {
    pub path: PathBuf,
    pub content: String,
    pub mode: WriteMode,
}

#[derive(Default)]
struct State {
    calls: Mutex<Vec<WriteCall>>,
    failing_calls: HashSet<usize>,
    delay: Duration,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Records every physical write and can fail chosen calls (by index).
#[derive(Clone, Default)]
pub struct RecordingFileWriter {
    state: Arc<State>,
}

impl RecordingFileWriter {
    pub fn new() -> Self {
        RecordingFileWriter::default()
    }

    pub fn failing_on(calls: &[usize]) -> Self {
        RecordingFileWriter::build(calls, Duration::ZERO)
    }

    /// Every write takes `delay` before completing.
    pub fn slow(delay: Duration) -> Self {
        RecordingFileWriter::build(&[], delay)
    }

    fn build(failing_calls: &[usize], delay: Duration) -> Self {
        RecordingFileWriter {
            state: Arc::new(State {
                failing_calls: failing_calls.iter().copied().collect(),
                delay,
                ..State::default()
            }),
        }
    }

    pub fn calls(&self) -> Vec<WriteCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

impl FileWriter for RecordingFileWriter {
    async fn write(&self, path: &Path, content: &str, mode: WriteMode) -> io::Result<()> {
        let index = {
            let mut calls = self.state.calls.lock().unwrap();
            calls.push(WriteCall {
                path: path.to_path_buf(),
                content: content.to_string(),
                mode,
            });
            calls.len() - 1
        };

        let in_flight = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .max_in_flight
            .fetch_max(in_flight, Ordering::SeqCst);

        if self.state.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.state.delay).await;
        }

        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.state.failing_calls.contains(&index) {
            Err(io::Error::new(ErrorKind::Other, "disk full"))
        } else {
            Ok(())
        }
    }
}
