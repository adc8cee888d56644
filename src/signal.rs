use tokio::sync::mpsc;

/// Request forwarded from the relay to the rotation loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Rotate,
    Terminate,
}

/// Signal categories the relay subscribes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Incoming {
    Hangup,
    Terminate,
    Pipe,
    User1,
    User2,
}

impl Incoming {
    fn name(self) -> &'static str {
        match self {
            Incoming::Hangup => "SIGHUP",
            Incoming::Terminate => "SIGTERM",
            Incoming::Pipe => "SIGPIPE",
            Incoming::User1 => "SIGUSR1",
            Incoming::User2 => "SIGUSR2",
        }
    }
}

/// Map an incoming signal to the event forwarded to the loop, if any.
///
/// SIGPIPE never surfaces here: a broken output pipe is only meaningful
/// as a write error, which the error policy already covers.
fn translate(incoming: Incoming, ignore_terminate: bool) -> Option<Event> {
    match incoming {
        Incoming::Hangup => Some(Event::Rotate),
        Incoming::Terminate if ignore_terminate => None,
        Incoming::Terminate => Some(Event::Terminate),
        Incoming::Pipe | Incoming::User1 | Incoming::User2 => None,
    }
}

/// Register the signal streams and spawn the relay task.
///
/// The task runs for the life of the process and is never joined. Events
/// land on a single-slot channel: if the loop has not drained the previous
/// event yet, a new one is dropped rather than queued.
#[cfg(unix)]
pub fn spawn(ignore_terminate: bool) -> std::io::Result<mpsc::Receiver<Event>> {
    use {
        tokio::signal::unix::{SignalKind, signal},
        tracing::warn,
    };

    let (tx, rx) = mpsc::channel(1);

    let mut hangup = signal(SignalKind::hangup())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut pipe = signal(SignalKind::pipe())?;
    let mut user1 = signal(SignalKind::user_defined1())?;
    let mut user2 = signal(SignalKind::user_defined2())?;

    tokio::spawn(async move {
        loop {
            let incoming = tokio::select! {
                _ = hangup.recv() => Incoming::Hangup,
                _ = terminate.recv() => Incoming::Terminate,
                _ = pipe.recv() => Incoming::Pipe,
                _ = user1.recv() => Incoming::User1,
                _ = user2.recv() => Incoming::User2,
            };

            if let Incoming::User1 | Incoming::User2 = incoming {
                warn!(signal = incoming.name(), "unhandled signal received");
            }

            let Some(event) = translate(incoming, ignore_terminate) else {
                continue;
            };

            match tx.try_send(event) {
                Ok(()) | Err(mpsc::error::TrySendError::Full(_)) => {}
                Err(mpsc::error::TrySendError::Closed(_)) => return,
            }
        }
    });

    Ok(rx)
}

/// No signal surface on this platform; the receiver never yields an event.
#[cfg(not(unix))]
pub fn spawn(_ignore_terminate: bool) -> std::io::Result<mpsc::Receiver<Event>> {
    let (_tx, rx) = mpsc::channel(1);
    Ok(rx)
}
