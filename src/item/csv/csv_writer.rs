use std::{
    future::Future,
    path::{Path, PathBuf},
    pin::Pin,
    task::{Context, Poll},
};

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use tokio::{
    runtime::Handle,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};
use uuid::Uuid;

use crate::{
    core::{
        field::Header,
        file::{FileWriter, TokioFileWriter, WriteMode},
        item::{Record, Stringifier},
    },
    error::CsvWriterError,
};

use super::{
    csv_serializer::{CsvSerializer, RecordDelimiter},
    csv_stringifier::FieldStringifier,
};

type WriteResult = Result<(), CsvWriterError>;

/// Writes CSV lines to one file, one physical write at a time.
///
/// Every write operation serializes its line(s) immediately and queues one
/// physical write. Queued writes are issued strictly in call order by a
/// background task, each one only after the previous one has completed, so
/// the file content follows the call order even when the returned
/// [`PendingWrite`]s are not awaited in between.
///
/// The first physical write creates or truncates the file. Once a write has
/// succeeded, every later write appends. When the header has titles and
/// nothing has been written yet, the header line is prepended to the first
/// record write.
///
/// ```
/// use std::collections::HashMap;
///
/// use csv_writer_rs::core::field::{FieldSpec, Header};
/// use csv_writer_rs::item::csv::csv_writer::CsvFileWriterBuilder;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = std::env::temp_dir().join("csv_writer_rs_doc_people.csv");
///
/// let writer = CsvFileWriterBuilder::new()
///     .header(Header::fields([
///         FieldSpec::new("name", "NAME"),
///         FieldSpec::new("lang", "LANGUAGE"),
///     ]))
///     .from_path(&path)?;
///
/// let records = vec![
///     HashMap::from([("name".to_string(), "Bob"), ("lang".to_string(), "French, English")]),
///     HashMap::from([("name".to_string(), "Mary"), ("lang".to_string(), "English")]),
/// ];
/// writer.write_records(&records).await?;
/// writer.write_record(&HashMap::from([("name".to_string(), "Jane")])).await?;
/// writer.close().await?;
///
/// assert_eq!(
///     std::fs::read_to_string(&path)?,
///     "NAME,LANGUAGE\nBob,\"French, English\"\nMary,English\nJane,\n"
/// );
/// # Ok(())
/// # }
/// ```
pub struct CsvFileWriter<S> {
    id: Uuid,
    path: PathBuf,
    serializer: CsvSerializer<S>,
    sender: mpsc::UnboundedSender<WriteRequest>,
    worker: JoinHandle<()>,
}

impl<S> CsvFileWriter<S> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn serializer(&self) -> &CsvSerializer<S> {
        &self.serializer
    }

    /// Queues a write of the header line.
    ///
    /// Without titles this completes immediately: nothing is written and the
    /// writer state does not change.
    pub fn write_header(&self) -> PendingWrite {
        if !self.serializer.header().has_titles() {
            debug!("[{}] No header titles configured, skipping header", self.id);
            return PendingWrite::completed(Ok(()));
        }
        self.enqueue(Payload::Header)
    }

    /// Queues a write of one record line.
    pub fn write_record<R>(&self, record: &R) -> PendingWrite
    where
        R: Record + ?Sized,
        S: Stringifier<R::Value>,
    {
        match self.serializer.serialize_record(record) {
            Ok(line) => self.enqueue(Payload::Records {
                body: line,
                count: 1,
            }),
            Err(error) => PendingWrite::completed(Err(error)),
        }
    }

    /// Queues a single physical write holding every record line, in order.
    ///
    /// If any record cannot be stringified nothing is queued.
    pub fn write_records<R>(&self, records: &[R]) -> PendingWrite
    where
        R: Record,
        S: Stringifier<R::Value>,
    {
        match self.serializer.serialize_records(records) {
            Ok(block) => self.enqueue(Payload::Records {
                body: block,
                count: records.len(),
            }),
            Err(error) => PendingWrite::completed(Err(error)),
        }
    }

    /// Stops accepting writes and waits until every queued write is done.
    pub async fn close(self) -> Result<(), CsvWriterError> {
        let CsvFileWriter {
            id,
            path,
            sender,
            worker,
            ..
        } = self;

        drop(sender);
        worker
            .await
            .map_err(|error| CsvWriterError::Worker(error.to_string()))?;

        info!("[{}] Closed CSV writer for {}", id, path.display());
        Ok(())
    }

    fn enqueue(&self, payload: Payload) -> PendingWrite {
        let (response, receiver) = oneshot::channel();
        debug!("[{}] Queueing {}", self.id, payload);

        match self.sender.send(WriteRequest { payload, response }) {
            Ok(()) => PendingWrite::queued(receiver),
            Err(_) => PendingWrite::completed(Err(CsvWriterError::Closed)),
        }
    }
}

/// Completion of a queued write.
///
/// Dropping it does not cancel the write; it only discards the outcome.
#[derive(Debug)]
#[must_use = "the write is queued either way, await it to observe its outcome"]
pub struct PendingWrite {
    state: PendingState,
}

#[derive(Debug)]
enum PendingState {
    Completed(Option<WriteResult>),
    Queued(oneshot::Receiver<WriteResult>),
}

impl PendingWrite {
    fn completed(result: WriteResult) -> Self {
        PendingWrite {
            state: PendingState::Completed(Some(result)),
        }
    }

    fn queued(receiver: oneshot::Receiver<WriteResult>) -> Self {
        PendingWrite {
            state: PendingState::Queued(receiver),
        }
    }
}

impl Future for PendingWrite {
    type Output = WriteResult;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            PendingState::Completed(result) => {
                Poll::Ready(result.take().unwrap_or(Err(CsvWriterError::Closed)))
            }
            PendingState::Queued(receiver) => Pin::new(receiver)
                .poll(cx)
                .map(|received| received.unwrap_or(Err(CsvWriterError::Closed))),
        }
    }
}

enum Payload {
    Header,
    Records { body: String, count: usize },
}

impl std::fmt::Display for Payload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Payload::Header => write!(f, "header"),
            Payload::Records { count, .. } => write!(f, "{} record(s)", count),
        }
    }
}

struct WriteRequest {
    payload: Payload,
    response: oneshot::Sender<WriteResult>,
}

/// Owns the file and the written-once flag; drains the queue one request at a time.
struct WriteWorker<F> {
    id: Uuid,
    path: PathBuf,
    header_line: Option<String>,
    file_writer: F,
    has_written_once: bool,
}

impl<F: FileWriter> WriteWorker<F> {
    async fn run(mut self, mut requests: mpsc::UnboundedReceiver<WriteRequest>) {
        while let Some(request) = requests.recv().await {
            let result = self.process(request.payload).await;

            if let Err(Err(error)) = request.response.send(result) {
                warn!("[{}] Write failure not observed by caller: {}", self.id, error);
            }
        }
        debug!("[{}] Write queue drained", self.id);
    }

    async fn process(&mut self, payload: Payload) -> WriteResult {
        let content = match payload {
            Payload::Header => match &self.header_line {
                Some(header) => header.clone(),
                None => return Ok(()),
            },
            Payload::Records { body, .. } => match &self.header_line {
                Some(header) if !self.has_written_once => format!("{}{}", header, body),
                _ => body,
            },
        };

        let mode = if self.has_written_once {
            WriteMode::Append
        } else {
            WriteMode::Truncate
        };

        debug!(
            "[{}] Writing {} bytes to {} ({})",
            self.id,
            content.len(),
            self.path.display(),
            mode
        );

        match self.file_writer.write(&self.path, &content, mode).await {
            Ok(()) => {
                self.has_written_once = true;
                Ok(())
            }
            Err(source) => {
                error!(
                    "[{}] Failed to write to {}: {}",
                    self.id,
                    self.path.display(),
                    source
                );
                Err(CsvWriterError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

/// Serializable writer settings, e.g. loaded from a JSON file.
///
/// ```
/// use csv_writer_rs::item::csv::csv_writer::CsvWriterConfig;
///
/// let config: CsvWriterConfig = serde_json::from_str(r#"{
///     "path": "out.csv",
///     "header": [{"id": "name", "title": "NAME"}],
///     "field_delimiter": ";"
/// }"#).unwrap();
///
/// assert_eq!(config.field_delimiter, ';');
/// assert!(!config.append);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvWriterConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub header: Header,
    #[serde(default = "default_field_delimiter")]
    pub field_delimiter: char,
    #[serde(default)]
    pub record_delimiter: RecordDelimiter,
    #[serde(default)]
    pub always_quote: bool,
    #[serde(default)]
    pub append: bool,
}

fn default_field_delimiter() -> char {
    ','
}

pub struct CsvFileWriterBuilder<F = TokioFileWriter> {
    header: Header,
    delimiter: u8,
    record_delimiter: RecordDelimiter,
    always_quote: bool,
    append: bool,
    file_writer: F,
}

impl Default for CsvFileWriterBuilder<TokioFileWriter> {
    fn default() -> Self {
        CsvFileWriterBuilder::new()
    }
}

impl CsvFileWriterBuilder<TokioFileWriter> {
    pub fn new() -> CsvFileWriterBuilder<TokioFileWriter> {
        CsvFileWriterBuilder {
            header: Header::default(),
            delimiter: b',',
            record_delimiter: RecordDelimiter::Lf,
            always_quote: false,
            append: false,
            file_writer: TokioFileWriter,
        }
    }
}

impl<F> CsvFileWriterBuilder<F> {
    pub fn header(mut self, header: impl Into<Header>) -> CsvFileWriterBuilder<F> {
        self.header = header.into();
        self
    }

    pub fn delimiter(mut self, delimiter: u8) -> CsvFileWriterBuilder<F> {
        self.delimiter = delimiter;
        self
    }

    pub fn record_delimiter(mut self, delimiter: RecordDelimiter) -> CsvFileWriterBuilder<F> {
        self.record_delimiter = delimiter;
        self
    }

    /// Quote every value. Only applies to the default stringifier.
    pub fn always_quote(mut self, yes: bool) -> CsvFileWriterBuilder<F> {
        self.always_quote = yes;
        self
    }

    /// Start in append mode: no header is prepended and the first write
    /// does not truncate the file.
    pub fn append(mut self, yes: bool) -> CsvFileWriterBuilder<F> {
        self.append = yes;
        self
    }

    /// Replace the primitive used for physical writes.
    pub fn file_writer<G>(self, file_writer: G) -> CsvFileWriterBuilder<G> {
        CsvFileWriterBuilder {
            header: self.header,
            delimiter: self.delimiter,
            record_delimiter: self.record_delimiter,
            always_quote: self.always_quote,
            append: self.append,
            file_writer,
        }
    }
}

impl<F> CsvFileWriterBuilder<F>
where
    F: FileWriter + Send + Sync + 'static,
{
    /// Builds a writer using [`FieldStringifier`] for values.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_path<P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<CsvFileWriter<FieldStringifier>, CsvWriterError> {
        let stringifier = FieldStringifier::new(self.delimiter).always_quote(self.always_quote);
        self.from_path_with(path, stringifier)
    }

    /// Builds a writer using the given stringifier for values.
    ///
    /// Must be called from within a tokio runtime.
    pub fn from_path_with<P: AsRef<Path>, S>(
        self,
        path: P,
        stringifier: S,
    ) -> Result<CsvFileWriter<S>, CsvWriterError> {
        let path = path.as_ref().to_path_buf();
        if path.as_os_str().is_empty() {
            return Err(CsvWriterError::Config("path must not be empty".to_string()));
        }
        check_delimiter(self.delimiter)?;

        let runtime = Handle::try_current().map_err(|error| {
            CsvWriterError::Config(format!("a tokio runtime is required: {}", error))
        })?;

        let serializer = CsvSerializer::new(self.header, stringifier)
            .field_delimiter(char::from(self.delimiter))
            .record_delimiter(self.record_delimiter);

        let id = Uuid::new_v4();
        let worker = WriteWorker {
            id,
            path: path.clone(),
            header_line: serializer.header_line(),
            file_writer: self.file_writer,
            has_written_once: self.append,
        };

        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = runtime.spawn(worker.run(receiver));

        info!(
            "[{}] Opened CSV writer for {} (append: {})",
            id,
            path.display(),
            self.append
        );

        Ok(CsvFileWriter {
            id,
            path,
            serializer,
            sender,
            worker,
        })
    }

    /// Applies `config` and builds a writer with the default stringifier.
    pub fn from_config(
        self,
        config: &CsvWriterConfig,
    ) -> Result<CsvFileWriter<FieldStringifier>, CsvWriterError> {
        if !config.field_delimiter.is_ascii() {
            return Err(CsvWriterError::Config(format!(
                "field delimiter '{}' is not an ASCII character",
                config.field_delimiter
            )));
        }

        self.header(config.header.clone())
            .delimiter(config.field_delimiter as u8)
            .record_delimiter(config.record_delimiter)
            .always_quote(config.always_quote)
            .append(config.append)
            .from_path(&config.path)
    }
}

fn check_delimiter(delimiter: u8) -> Result<(), CsvWriterError> {
    match delimiter {
        b'"' | b'\r' | b'\n' => Err(CsvWriterError::Config(format!(
            "{:?} cannot be used as field delimiter",
            char::from(delimiter)
        ))),
        d if !d.is_ascii() => Err(CsvWriterError::Config(format!(
            "field delimiter must be ASCII, got byte {}",
            d
        ))),
        _ => Ok(()),
    }
}
