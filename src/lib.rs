pub mod error;
pub mod config;
pub mod request;
pub mod backend;
pub mod session;
pub mod client;

pub use backend::MosaicClient;
pub use client::MosaicSession;
pub use config::MosaicConfig;
pub use error::Error;
pub use request::{
  ColorGroup, FormUpdate, MosaicForm, MosaicRequest, MosaicResponse
};
pub use session::{SessionState, Submission, ToggleOutcome};

/*

mosaicart: client for the album cover mosaic service.

The operator fills in a form (album, artist, RGB color, color group,
tile counts), the session POSTs it as JSON to the mosaic endpoint and
holds the returned mosaic until it is reset.

mosaicart/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Session command interface and re-exports
│   ├── main.rs         # Operator front-end
│   ├── error.rs        # Error type
│   ├── config.rs       # Endpoint and timeout configuration
│   ├── request.rs      # Request, response and form types
│   ├── session.rs      # Form, loading flag and current mosaic
│   ├── client.rs       # Session task owning the state
│   └── backend/
│       ├── mod.rs
│       └── http.rs     # POST /AlbumCoverMosaic
└── tests/

*/

/// MOSAIC SESSION INTERFACE:

// ===== UpdateForm =====

pub type UpdateFormReply = Result<(), crate::error::Error>;
pub type UpdateFormReplySender
  = tokio::sync::mpsc::UnboundedSender<UpdateFormReply>;

pub struct UpdateFormArgs
{   pub update: crate::request::FormUpdate
  , pub reply: UpdateFormReplySender
}

// ===== Submit =====

pub type SubmitReply
  = Result<crate::request::MosaicResponse, crate::error::Error>;
pub type SubmitReplySender
  = tokio::sync::mpsc::UnboundedSender<SubmitReply>;

pub struct SubmitArgs
{   pub reply: SubmitReplySender
}

// ===== ToggleOrReset =====

pub type ToggleOrResetReply
  = Result<crate::session::ToggleOutcome, crate::error::Error>;
pub type ToggleOrResetReplySender
  = tokio::sync::mpsc::UnboundedSender<ToggleOrResetReply>;

pub struct ToggleOrResetArgs
{   pub reply: ToggleOrResetReplySender
}

// ===== Snapshot =====

pub type SnapshotReply
  = Result<crate::session::SessionState, crate::error::Error>;
pub type SnapshotReplySender
  = tokio::sync::mpsc::UnboundedSender<SnapshotReply>;

pub struct SnapshotArgs
{   pub reply: SnapshotReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== SessionCommand =====

/// Union of all commands a session handles, in the order they were sent
pub enum SessionCommand
{   UpdateForm(UpdateFormArgs)
  , Submit(SubmitArgs)
  , ToggleOrReset(ToggleOrResetArgs)
  , Snapshot(SnapshotArgs)
  , KillProcess(KillProcessArgs)
}

// ===== MosaicHand (sender side) =====

pub struct MosaicHand
{   pub command_tx
      : tokio::sync::mpsc::UnboundedSender<SessionCommand>
}

// ===== MosaicFoot (receiver side) =====

pub struct MosaicFoot
{   pub command_rx
      : tokio::sync::mpsc::UnboundedReceiver<SessionCommand>
}
