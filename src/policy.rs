use {clap::ValueEnum, std::io, tracing::warn};

/// What to do when an operation on one of the output sinks fails.
///
/// Selected once at startup via `--output-error`; the same policy gates
/// every write, close, rename, and open performed after that.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ErrorPolicy {
    /// Suppress every output error.
    Ignore,
    /// Log every output error and keep going.
    Warn,
    /// Like warn, but broken pipes are suppressed.
    WarnNopipe,
    /// Exit on any output error.
    Exit,
    /// Exit on output errors other than broken pipes.
    ExitNopipe,
    /// Exit on a broken pipe, log anything else.
    Sigpipe,
}

/// Which output the failed operation was addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sink {
    Passthrough,
    File,
}

impl Sink {
    fn as_str(self) -> &'static str {
        match self {
            Sink::Passthrough => "stdout",
            Sink::File => "file",
        }
    }
}

/// Outcome of classifying a failed operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Suppress,
    Log,
    Fatal,
}

enum Failure {
    /// The handle was already closed, or was never opened.
    InvalidHandle,
    Pipe,
    Other,
}

impl Failure {
    fn of(err: &io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::InvalidInput => Failure::InvalidHandle,
            io::ErrorKind::BrokenPipe => Failure::Pipe,
            _ => Failure::Other,
        }
    }
}

impl ErrorPolicy {
    /// Classify a failed operation on `sink`.
    ///
    /// Pure; the caller acts on the verdict. The sink never changes the
    /// verdict, it is carried for diagnostics only.
    pub fn classify(self, _sink: Sink, err: &io::Error) -> Verdict {
        match (self, Failure::of(err)) {
            (ErrorPolicy::Ignore, _) => Verdict::Suppress,
            (ErrorPolicy::Warn, Failure::InvalidHandle) => Verdict::Suppress,
            (ErrorPolicy::Warn, _) => Verdict::Log,
            (ErrorPolicy::WarnNopipe, Failure::InvalidHandle | Failure::Pipe) => Verdict::Suppress,
            (ErrorPolicy::WarnNopipe, Failure::Other) => Verdict::Log,
            (ErrorPolicy::Exit, _) => Verdict::Fatal,
            (ErrorPolicy::ExitNopipe, Failure::InvalidHandle | Failure::Pipe) => Verdict::Suppress,
            (ErrorPolicy::ExitNopipe, Failure::Other) => Verdict::Fatal,
            (ErrorPolicy::Sigpipe, Failure::InvalidHandle) => Verdict::Suppress,
            (ErrorPolicy::Sigpipe, Failure::Pipe) => Verdict::Fatal,
            (ErrorPolicy::Sigpipe, Failure::Other) => Verdict::Log,
        }
    }

    /// Gate an I/O outcome: suppressed and logged errors vanish, fatal ones
    /// come back to the caller.
    pub fn apply(self, sink: Sink, result: io::Result<()>) -> io::Result<()> {
        match result {
            Ok(()) => Ok(()),
            Err(err) => match self.classify(sink, &err) {
                Verdict::Suppress => Ok(()),
                Verdict::Log => {
                    warn!(sink = sink.as_str(), error = %err, "output error");
                    Ok(())
                }
                Verdict::Fatal => Err(err),
            },
        }
    }
}
