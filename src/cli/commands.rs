//! CLI command implementations
//!
//! Every command boots the same way:
//! 1. Configuration load and validation
//! 2. Data file load (empty store if absent)
//! 3. Store client and handler construction
//!
//! Commands then answer on stdout. Successful writes are saved back to the
//! data file before the response is written.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncWrite};

use crate::api::{ErrorResponse, ReadHandler, Response, WriteHandler};
use crate::config::Config;
use crate::observability::{log_event, log_event_with_fields, Event, Logger, MetricsRegistry, MetricsSnapshot};
use crate::store::{MemoryStore, StoreClient, StudentStore};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{next_line, read_request, stdin, stdout, write_json};

/// Operation named by a serve envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Read,
    Write,
}

/// One line of `serve` input
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub op: Operation,
    #[serde(default)]
    pub payload: Value,
}

/// Booted process state shared by all commands
pub struct Roster {
    config: Config,
    memory: Arc<MemoryStore>,
    reader: ReadHandler,
    writer: WriteHandler,
    metrics: Arc<MetricsRegistry>,
}

impl Roster {
    /// Loads the data file and wires the handlers to one store client
    pub async fn boot(config: Config) -> CliResult<Self> {
        log_event(Event::BootStart);

        let schema = config.table_schema();
        let memory = match &config.data_file {
            Some(path) => {
                let store = MemoryStore::load(schema.clone(), path).await?;
                let count = store.len().await.to_string();
                let path_text = path.display().to_string();
                log_event_with_fields(
                    Event::DataLoaded,
                    &[("path", path_text.as_str()), ("records", count.as_str())],
                );
                store
            }
            None => MemoryStore::new(schema.clone()),
        };
        let memory = Arc::new(memory);

        let client = StoreClient::new(Arc::clone(&memory), config.client_options());
        let store: Arc<dyn StudentStore> = Arc::new(client);
        let metrics = Arc::new(MetricsRegistry::new());

        let reader = ReadHandler::new(Arc::clone(&store), schema.clone(), Arc::clone(&metrics));
        let writer = WriteHandler::new(store, schema, Arc::clone(&metrics), config.write_failure_policy);

        log_event_with_fields(
            Event::BootComplete,
            &[("endpoint", config.endpoint.as_str()), ("region", config.region.as_str())],
        );

        Ok(Self {
            config,
            memory,
            reader,
            writer,
            metrics,
        })
    }

    pub async fn read(&self, query: &Value) -> Response {
        match self.reader.handle(query).await {
            Ok(records) => match serde_json::to_value(records) {
                Ok(data) => Response::success(data),
                Err(e) => Response::Error(ErrorResponse::new("ROSTER_CLI_IO_ERROR", e.to_string())),
            },
            Err(e) => Response::error(&e),
        }
    }

    /// Handles a write and saves the data file after a success
    pub async fn write(&self, payload: &Value) -> CliResult<Response> {
        match self.writer.handle(payload).await {
            Ok(()) => {
                self.persist().await?;
                Ok(Response::ok())
            }
            Err(e) => Ok(Response::error(&e)),
        }
    }

    /// Answers one `serve` line. Every line gets a response; a failed
    /// save is answered as an error and serving continues.
    pub async fn dispatch(&self, line: &str) -> Response {
        let envelope: Envelope = match serde_json::from_str(line) {
            Ok(envelope) => envelope,
            Err(e) => {
                return Response::Error(ErrorResponse::new(
                    "ROSTER_INVALID_REQUEST",
                    format!("Invalid envelope: {}", e),
                ))
            }
        };

        match envelope.op {
            Operation::Read => self.read(&envelope.payload).await,
            Operation::Write => match self.write(&envelope.payload).await {
                Ok(response) => response,
                Err(e) => Response::Error(ErrorResponse::new(e.code_str(), e.message())),
            },
        }
    }

    /// Writes the store back to the data file, if one is configured
    pub async fn persist(&self) -> CliResult<()> {
        let Some(path) = &self.config.data_file else {
            return Ok(());
        };
        let path_text = path.display().to_string();
        if let Err(e) = self.memory.save(path).await {
            let error_text = e.to_string();
            log_event_with_fields(
                Event::DataSaveFailed,
                &[("error", error_text.as_str()), ("path", path_text.as_str())],
            );
            return Err(CliError::persist_failed(error_text));
        }

        log_event_with_fields(Event::DataSaved, &[("path", path_text.as_str())]);
        Ok(())
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}

/// Main CLI entry point
pub async fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command).await
}

pub async fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Read { config } => read(&config).await,
        Command::Write { config } => write(&config).await,
        Command::Serve { config } => serve(&config).await,
    }
}

async fn boot_from(config_path: &Path) -> CliResult<Roster> {
    let config = Config::load(config_path)?;
    Logger::set_min_severity(config.log_level);

    let table = config.table_name.clone();
    let path_text = config_path.display().to_string();
    log_event_with_fields(
        Event::ConfigLoaded,
        &[("path", path_text.as_str()), ("table_name", table.as_str())],
    );

    Roster::boot(config).await
}

/// Answer one query object read from stdin
pub async fn read(config_path: &Path) -> CliResult<()> {
    let roster = boot_from(config_path).await?;
    let query = read_request(&mut stdin()).await?;
    let response = roster.read(&query).await;
    write_json(&mut stdout(), &response.to_json()).await
}

/// Validate and store one record read from stdin
pub async fn write(config_path: &Path) -> CliResult<()> {
    let roster = boot_from(config_path).await?;
    let payload = read_request(&mut stdin()).await?;
    let response = roster.write(&payload).await?;
    write_json(&mut stdout(), &response.to_json()).await
}

/// Answer envelopes from stdin until it closes
pub async fn serve(config_path: &Path) -> CliResult<()> {
    let roster = boot_from(config_path).await?;
    serve_lines(&roster, &mut stdin(), &mut stdout()).await
}

/// Serving loop over arbitrary reader/writer pairs
pub async fn serve_lines<R, W>(roster: &Roster, input: &mut R, output: &mut W) -> CliResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    log_event(Event::Serving);

    while let Some(line) = next_line(input).await? {
        let response = roster.dispatch(&line).await;
        write_json(output, &response.to_json()).await?;
    }

    let snapshot = serde_json::to_string(&roster.metrics())?;
    log_event_with_fields(Event::Shutdown, &[("metrics", snapshot.as_str())]);
    Ok(())
}
