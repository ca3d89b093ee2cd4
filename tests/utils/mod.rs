pub mod events;
pub mod listeners;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use events::{Bar, Foo, K};
#[allow(unused_imports)]
pub use listeners::{FailingListener, JournalListener, RecordingListener};
