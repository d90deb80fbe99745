pub mod broadcast;
pub mod coordinator;
pub mod health;
pub mod notifier;

pub use broadcast::{BroadcastError, Broadcaster, TelegramBroadcaster};
pub use coordinator::{CommandOutcome, CoordinatorSettings, SessionCoordinator};
pub use notifier::{DeadlineNotifier, NotifierExit, NotifierHandle};
