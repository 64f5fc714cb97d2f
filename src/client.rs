use tokio::sync::mpsc;
use log::{debug, error, info};

use crate::backend::MosaicClient;
use crate::config::MosaicConfig;
use crate::error::Error;
use crate::request::{FormUpdate, MosaicForm};
use crate::session::{SessionState, Submission, ToggleOutcome};
use crate::{MosaicFoot, SessionCommand};

/// Reply channel waiting on an outstanding submission
enum PendingReply
{   Submit(crate::SubmitReplySender)
  , Toggle(crate::ToggleOrResetReplySender)
}

impl PendingReply
{   fn send(self, outcome: crate::SubmitReply)
    {   match self
        {   PendingReply::Submit(reply) => {
              let _ = reply.send(outcome);
            }
          , PendingReply::Toggle(reply) => {
              let _ = reply.send(outcome.map(ToggleOutcome::Loaded));
            }
        }
    }
}

/// A finished HTTP call routed back into the session loop
struct Completion
{   generation: u64
  , outcome: crate::SubmitReply
  , reply: PendingReply
}

/// Public API for one mosaic session - owns the task
///
/// Commands are handled in the order they are sent, whether or not the
/// caller waits for each reply before sending the next.
pub struct MosaicSession
{   hand: crate::MosaicHand
  , _task_handle: tokio::task::JoinHandle<()>
}

impl MosaicSession
{   /// Create and spawn a session with an empty form
    /// Returns immediately - spawns background task
    pub fn new(config: MosaicConfig) -> Result<Self, Error>
    {   Self::with_form(config, MosaicForm::default())
    }

    /// Create and spawn a session starting from the given form
    pub fn with_form(
      config: MosaicConfig
    , form: MosaicForm
    ) -> Result<Self, Error>
    {   debug!("Creating MosaicSession for {}", config.endpoint);
        let client = MosaicClient::new(&config)?;

        let (command_tx, command_rx)
          = mpsc::unbounded_channel();

        let hand = crate::MosaicHand { command_tx };
        let foot = crate::MosaicFoot { command_rx };

        let state = SessionState::new(form);
        let _task_handle = tokio::spawn(async move {
          run_session_loop(foot, client, state).await
        });

        Ok(MosaicSession
        {   hand
          , _task_handle
        })
    }

    fn send(&self, cmd: SessionCommand) -> Result<(), Error>
    {   self.hand.command_tx
          .send(cmd)
          .map_err(|_| {
            error!("Session channel closed");
            Error::Other("Session disconnected".to_string())
          })
    }

    /// Edit one form field - returns almost immediately
    pub async fn update_form(
      &self
    , update: FormUpdate
    ) -> Result<
        mpsc::UnboundedReceiver<crate::UpdateFormReply>,
        Error
      >
    {   debug!("update_form queuing {:?}", update);
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        self.send(SessionCommand::UpdateForm(crate::UpdateFormArgs
        {   update
          , reply: reply_tx
        }))?;

        Ok(reply_rx)
    }

    /// Submit the form as it stands once earlier commands are applied
    ///
    /// The reply arrives once the endpoint has answered.
    pub async fn submit(
      &self
    ) -> Result<
        mpsc::UnboundedReceiver<crate::SubmitReply>,
        Error
      >
    {   debug!("submit queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        self.send(SessionCommand::Submit(
          crate::SubmitArgs { reply: reply_tx }
        ))?;

        Ok(reply_rx)
    }

    /// Clear the held mosaic, or submit when none is held
    pub async fn toggle_or_reset(
      &self
    ) -> Result<
        mpsc::UnboundedReceiver<crate::ToggleOrResetReply>,
        Error
      >
    {   debug!("toggle_or_reset queuing command");
        let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        self.send(SessionCommand::ToggleOrReset(
          crate::ToggleOrResetArgs { reply: reply_tx }
        ))?;

        Ok(reply_rx)
    }

    /// Copy of the current session state
    pub async fn snapshot(
      &self
    ) -> Result<
        mpsc::UnboundedReceiver<crate::SnapshotReply>,
        Error
      >
    {   let (reply_tx, reply_rx)
          = mpsc::unbounded_channel();

        self.send(SessionCommand::Snapshot(
          crate::SnapshotArgs { reply: reply_tx }
        ))?;

        Ok(reply_rx)
    }

    /// Gracefully shutdown the session
    ///
    /// An outstanding HTTP call is left to finish; its outcome is dropped.
    pub async fn shutdown(self)
      -> Result<(), Error>
    {   debug!("Shutting down MosaicSession");
        let (reply_tx, mut reply_rx)
          = mpsc::unbounded_channel();

        self.send(SessionCommand::KillProcess(
          crate::KillProcessArgs { reply: reply_tx }
        ))?;

        match reply_rx.recv().await
        {   Some(result) => {
              debug!("Session shutdown confirmed");
              result
            }
          , None => {
              error!("Session stopped before confirming shutdown");
              Err(Error::Other("Session disconnected".to_string()))
            }
        }
    }
}

/// Capture the request and run the HTTP call on its own task
fn start_submission(
  state: &mut SessionState
, client: &MosaicClient
, completion_tx: &mpsc::UnboundedSender<Completion>
, reply: PendingReply
)
{   let Submission { generation, request } = match state.begin_submit()
    {   Ok(submission) => submission
      , Err(e) => {
          reply.send(Err(e));
          return;
        }
    };

    let client = client.clone();
    let done_tx = completion_tx.clone();
    tokio::spawn(async move {
      let outcome = client.submit(&request).await;
      let _ = done_tx.send(Completion { generation, outcome, reply });
    });
}

/// Apply one command to the session
///
/// Returns false once the session should stop.
fn handle_command(
  cmd: SessionCommand
, state: &mut SessionState
, client: &MosaicClient
, completion_tx: &mpsc::UnboundedSender<Completion>
) -> bool
{   match cmd
    {   SessionCommand::UpdateForm(cmd) => {
          state.update_form(cmd.update);
          let _ = cmd.reply.send(Ok(()));
        }
      , SessionCommand::Submit(cmd) => {
          debug!("Received Submit");
          start_submission(
            state,
            client,
            completion_tx,
            PendingReply::Submit(cmd.reply)
          );
        }
      , SessionCommand::ToggleOrReset(cmd) => {
          debug!("Received ToggleOrReset");
          if state.has_result()
          {   state.reset();
              let _ = cmd.reply.send(Ok(ToggleOutcome::Reset));
          } else
          {   start_submission(
                state,
                client,
                completion_tx,
                PendingReply::Toggle(cmd.reply)
              );
          }
        }
      , SessionCommand::Snapshot(cmd) => {
          let _ = cmd.reply.send(Ok(state.clone()));
        }
      , SessionCommand::KillProcess(cmd) => {
          debug!("Received KillProcess");
          let _ = cmd.reply.send(Ok(()));
          info!("MosaicSession shutting down");
          return false;
        }
    }
    true
}

/// Main session event loop
async fn run_session_loop(
  foot: MosaicFoot
, client: MosaicClient
, mut state: SessionState
)
{   debug!("Starting MosaicSession event loop");
    let MosaicFoot { mut command_rx } = foot;
    let (completion_tx, mut completion_rx)
      = mpsc::unbounded_channel::<Completion>();

    loop
    { tokio::select!
      { Some(done) = completion_rx.recv() => {
          debug!("Submission completed");
          state.finish_submit(done.generation, &done.outcome);
          done.reply.send(done.outcome);
        }
      , cmd = command_rx.recv() => {
          match cmd
          {   Some(cmd) => {
                if !handle_command(
                  cmd,
                  &mut state,
                  &client,
                  &completion_tx
                )
                {   break;
                }
              }
            , None => {
                debug!("Command channel closed");
                break;
              }
          }
        }
      }
    }
}
