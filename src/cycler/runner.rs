//! Async cycler driver
//!
//! Runs a [`PhraseCycler`] on a tokio task with a single outstanding timer.
//! The latest frame is kept on a watch channel; hosts that need every state
//! change also take a [`FrameStream`].

use tokio::sync::{mpsc, watch};
use tokio::task::{JoinError, JoinHandle};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, error, info};

use super::error::{CyclerError, CyclerResult};
use super::machine::{Frame, PhraseCycler};
use super::phrases::PhraseSet;
use super::timing::CyclerConfig;

/// Message sent from a [`CyclerHandle`] to its task
#[derive(Debug)]
enum Command {
    Reconfigure {
        phrases: PhraseSet,
        config: CyclerConfig,
    },
}

/// Every frame published after the initial one, in order.
///
/// Unlike the watch channel, nothing is coalesced: two firings at the same
/// instant yield two frames.
pub type FrameStream = mpsc::UnboundedReceiver<Frame>;

/// Handle to a running cycler task.
///
/// Dropping the handle without calling [`CyclerHandle::teardown`] closes the
/// command channel, which also stops the task.
#[derive(Debug)]
pub struct CyclerHandle {
    frames: watch::Receiver<Frame>,
    commands: mpsc::Sender<Command>,
    task: JoinHandle<()>,
}

/// Spawn `cycler` on the current tokio runtime.
///
/// The initial frame (empty text, typing) is visible immediately.
#[must_use]
pub fn spawn(cycler: PhraseCycler) -> CyclerHandle {
    start(cycler, None)
}

/// Like [`spawn`], also returning a stream of every published frame.
#[must_use]
pub fn spawn_with_stream(cycler: PhraseCycler) -> (CyclerHandle, FrameStream) {
    let (stream_tx, stream_rx) = mpsc::unbounded_channel();
    (start(cycler, Some(stream_tx)), stream_rx)
}

fn start(
    cycler: PhraseCycler,
    stream: Option<mpsc::UnboundedSender<Frame>>,
) -> CyclerHandle {
    let (frame_tx, frame_rx) = watch::channel(cycler.frame(0));
    let (command_tx, command_rx) = mpsc::channel(8);

    info!(phrases = cycler.phrases().len(), "starting phrase cycler");
    let publisher = Publisher {
        latest: frame_tx,
        stream,
    };
    let task = tokio::spawn(run(cycler, publisher, command_rx));

    CyclerHandle {
        frames: frame_rx,
        commands: command_tx,
        task,
    }
}

impl CyclerHandle {
    /// A receiver that observes every published frame.
    #[must_use]
    pub fn frames(&self) -> watch::Receiver<Frame> {
        self.frames.clone()
    }

    /// Latest published frame.
    #[must_use]
    pub fn current(&self) -> Frame {
        self.frames.borrow().clone()
    }

    /// Swap phrases and timing on the running cycler.
    ///
    /// The task cancels its pending timer and re-arms it with the new interval.
    pub async fn reconfigure(
        &self,
        phrases: PhraseSet,
        config: CyclerConfig,
    ) -> CyclerResult<()> {
        self.commands
            .send(Command::Reconfigure { phrases, config })
            .await
            .map_err(|_| CyclerError::Stopped)
    }

    /// Stop the task and cancel its pending timer.
    ///
    /// Once this returns no further frame is published.
    pub async fn teardown(self) -> Frame {
        self.task.abort();
        if finished_cleanly(self.task.await) {
            info!("phrase cycler torn down");
        }
        self.frames.borrow().clone()
    }
}

/// Report how the task ended. Cancellation counts as a clean stop.
fn finished_cleanly(result: Result<(), JoinError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) if err.is_cancelled() => true,
        Err(err) => {
            error!("phrase cycler task failed: {err}");
            false
        }
    }
}

/// Fan-out for published frames
struct Publisher {
    latest: watch::Sender<Frame>,
    stream: Option<mpsc::UnboundedSender<Frame>>,
}

impl Publisher {
    fn publish(&mut self, frame: Frame) {
        let closed = self
            .stream
            .as_ref()
            .is_some_and(|stream| stream.send(frame.clone()).is_err());
        if closed {
            debug!("frame stream closed");
            self.stream = None;
        }
        self.latest.send_replace(frame);
    }
}

async fn run(
    mut cycler: PhraseCycler,
    mut frames: Publisher,
    mut commands: mpsc::Receiver<Command>,
) {
    let started = Instant::now();
    let mut deadline = cycler.next_delay().map(|delay| started + delay);

    loop {
        let timer = async move {
            match deadline {
                Some(at) => sleep_until(at).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            () = timer => {
                let fired = deadline.unwrap_or_else(Instant::now);
                let step = cycler.advance();
                let frame = cycler.frame(elapsed_ms(started, fired));
                debug!(?step, text = %frame.text, phase = ?frame.phase, "tick");
                frames.publish(frame);
                deadline = cycler.next_delay().map(|delay| fired + delay);
            }
            command = commands.recv() => {
                let Some(Command::Reconfigure { phrases, config }) = command else {
                    debug!("command channel closed, stopping phrase cycler");
                    break;
                };
                info!(phrases = phrases.len(), "reconfiguring phrase cycler");
                cycler.reconfigure(phrases, config);
                let now = Instant::now();
                frames.publish(cycler.frame(elapsed_ms(started, now)));
                deadline = cycler.next_delay().map(|delay| now + delay);
            }
        }
    }
}

fn elapsed_ms(started: Instant, at: Instant) -> u64 {
    u64::try_from(at.duration_since(started).as_millis()).unwrap_or(u64::MAX)
}
