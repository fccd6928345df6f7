//! Remote desktop client command lines
//!
//! Only `FreeRDP` is supported; the wire protocol itself is left to the
//! external client.

pub mod freerdp;

pub use freerdp::{FROM_STDIN_FLAG, FreeRdpConfig, LaunchCommand, build_freerdp_args};
