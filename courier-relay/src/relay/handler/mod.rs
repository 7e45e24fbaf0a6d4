pub mod pipeline;
pub mod relay;
pub mod types;


pub use pipeline::{handle_health, handle_send, SendOutcome};
pub use relay::MessageRelay;
pub use types::*;
