mod errors;
pub mod fragment;
mod llm_client;
mod message;
pub mod providers;
mod stream;

pub use errors::*;
pub use llm_client::*;
pub use message::*;
pub use stream::*;

#[cfg(test)]
mod testing;
#[cfg(test)]
pub(crate) use testing::ScriptedProvider;
