pub mod telegram;
pub mod traits;
pub mod types;

#[cfg(test)]
mod tests;

pub use telegram::TelegramClient;
pub use traits::*;
pub use types::*;
