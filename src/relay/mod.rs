//! Interactive process pipe supervisor: spawn a child with all three standard
//! streams piped, relay output line by line, forward input, wait for exit.

pub mod session;
pub mod stream;
pub mod supervisor;

pub use session::{CommandSpec, Session, SessionPipes};
pub use stream::{spawn_input_forwarder, spawn_line_reader};
pub use supervisor::run_interactive;
