//! Notification channels for the fare bot.

pub mod telegram;

pub use telegram::TelegramNotifier;
