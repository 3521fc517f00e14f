//! The advising loop — Path Finder's heart.
//!
//! Each interaction cycle runs the same synchronous pass:
//!
//! 1. **Read** the selector state (program, semester, focus)
//! 2. **Resolve** the profile and upsert the summary message
//! 3. **On user input**: append it, assemble the layered prompt, call the
//!    completion provider, append and return the reply
//!
//! A failed completion leaves the transcript intact apart from the user's
//! own message, so they can simply ask again.

pub mod prompt;
pub mod session;

pub use prompt::PromptAssembler;
pub use session::{AdvisorSession, GREETING, SelectionError, SessionOptions};
