use {
    self::{
        clock::Clock,
        config::Config,
        file_handler::FileHandler,
        policy::{ErrorPolicy, Sink},
        reader::{LineRead, Reader},
        signal::Event,
    },
    anyhow::Context,
    std::{
        io,
        path::{Path, PathBuf},
    },
    tokio::{
        io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, BufReader},
        sync::mpsc,
    },
    tracing::debug,
};

pub mod config;
pub mod policy;
pub mod recover;
pub mod signal;

mod clock;
mod file_handler;
mod namer;
mod reader;


/// Copy stdin to stdout while mirroring the stream into size-rotated files.
///
/// Runs until the input ends, a terminate event arrives, or the error
/// policy declares an output error fatal.
pub async fn tee_rotate(config: &Config, events: mpsc::Receiver<Event>) -> anyhow::Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    tee_rotate_generic(
        input,
        tokio::io::stdout(),
        config,
        clock::StdClock,
        &mut file_handler::TokioFileHandler,
        events,
    )
    .await
}

/// The one file currently being written.
struct Current<F> {
    /// None after an open failure the policy suppressed; writes against it
    /// are classified as invalid-handle errors.
    file: Option<F>,
    path: PathBuf,
    written: u64,
}

async fn tee_rotate_generic<R, W, C, H>(
    input: R,
    mut passthrough: W,
    config: &Config,
    mut clock: C,
    handler: &mut H,
    mut events: mpsc::Receiver<Event>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    C: Clock,
    H: FileHandler,
{
    let policy = config.output_error;

    let path = namer::working_path(&config.dir, &config.prefix, &config.format, clock.now());
    let file = open_gated(handler, &path, policy).await?;
    let mut current = Current {
        file,
        path,
        written: 0,
    };

    let result = pump(
        &mut Reader::new(input),
        &mut passthrough,
        config,
        &mut clock,
        handler,
        &mut events,
        &mut current,
    )
    .await;

    // Runs on every exit path, fatal errors included: the working file must
    // never outlive the process under its in-progress name.
    if let Some(mut file) = current.file.take() {
        file.shutdown().await.ok();
    }
    if let Err(err) = handler
        .rename(&current.path, &namer::final_path(&current.path))
        .await
    {
        debug!(path = %current.path.display(), error = %err, "could not finalize current file");
    }

    result
}

async fn pump<R, W, C, H>(
    reader: &mut Reader<R>,
    passthrough: &mut W,
    config: &Config,
    clock: &mut C,
    handler: &mut H,
    events: &mut mpsc::Receiver<Event>,
    current: &mut Current<H::File>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    C: Clock,
    H: FileHandler,
{
    let policy = config.output_error;
    let mut rotate = false;
    let mut line = Vec::with_capacity(1024);

    loop {
        // Input loss is always significant; read errors are never gated.
        match reader.read_line(&mut line).await.context("stdin")? {
            LineRead::Eof => return Ok(()),
            LineRead::Line => {}
        }

        let echoed = write_line(passthrough, &line).await;
        policy.apply(Sink::Passthrough, echoed).context("stdout")?;

        // Look-ahead: rotate before the line that would cross the limit is
        // written, so it opens the next file instead of overflowing this one.
        let len = line.len() as u64 + 1;
        if current.written + len > config.max_size {
            rotate = true;
        }

        if rotate {
            rotate = false;
            current.written = 0;

            if let Some(mut file) = current.file.take() {
                policy
                    .apply(Sink::File, file.shutdown().await)
                    .with_context(|| current.path.display().to_string())?;
            }
            let finalized = handler
                .rename(&current.path, &namer::final_path(&current.path))
                .await;
            policy
                .apply(Sink::File, finalized)
                .with_context(|| current.path.display().to_string())?;

            current.path =
                namer::working_path(&config.dir, &config.prefix, &config.format, clock.now());
            current.file = open_gated(handler, &current.path, policy).await?;
        }

        let wrote = match current.file.as_mut() {
            Some(file) => write_line(file, &line).await,
            None => Err(closed_handle()),
        };
        policy
            .apply(Sink::File, wrote)
            .with_context(|| current.path.display().to_string())?;
        current.written += len;

        // Signals only take effect at line boundaries: a rotation request is
        // deferred to the next iteration, termination applies now that the
        // current line is fully written to both sinks.
        match events.try_recv() {
            Ok(Event::Terminate) => return Ok(()),
            Ok(Event::Rotate) => rotate = true,
            Err(_) => {}
        }
    }
}

async fn open_gated<H: FileHandler>(
    handler: &mut H,
    path: &Path,
    policy: ErrorPolicy,
) -> anyhow::Result<Option<H::File>> {
    match handler.open(path).await {
        Ok(file) => Ok(Some(file)),
        Err(err) => {
            policy
                .apply(Sink::File, Err(err))
                .with_context(|| path.display().to_string())?;
            Ok(None)
        }
    }
}

async fn write_line<W: AsyncWrite + Unpin>(sink: &mut W, line: &[u8]) -> io::Result<()> {
    sink.write_all(line).await?;
    sink.write_all(b"\n").await?;
    sink.flush().await
}

fn closed_handle() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, "file handle is closed")
}
