//! Command bridge for Mapwright.
//!
//! Clients send one JSON request per line naming a tool and its arguments;
//! the [`CommandBridge`] runs the matching [`mw_core::WorldStore`] operation,
//! answers with one JSON response line and publishes a
//! [`mw_core::WorldEvent`] for every successful change.
//!
//! Also provided: event sinks for the bridge to publish into and a
//! directory-backed [`mw_core::WorldRepository`].

/// Request dispatch and the line-oriented serving loops.
pub mod bridge;
/// Error types for the bridge.
pub mod error;
/// Request, response and argument types.
pub mod protocol;
/// JSON-file-per-world snapshot storage.
pub mod repository;
/// [`mw_core::EventSink`] implementations.
pub mod sink;

pub use bridge::CommandBridge;
pub use error::{BridgeError, BridgeResult};
pub use protocol::{TOOL_NAMES, ToolCall, ToolError, ToolRequest, ToolResponse, ToolStatus};
pub use repository::JsonDirRepository;
pub use sink::{BroadcastSink, LogSink, RecordingSink};
