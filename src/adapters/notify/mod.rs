//! Write failure notifier adapters.

mod collecting;
mod logging;

pub use collecting::CollectingFailureNotifier;
pub use logging::LoggingFailureNotifier;
