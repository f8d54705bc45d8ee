//! Event handlers
//!
//! One handler per supported event. Each is a state transition authorized
//! by the guard, executed against the entity stores, and announced via
//! fanout.

mod member_remove;
mod message_update;
mod ready;
mod remove_friend;
mod role_create;
mod user_update;

pub use member_remove::MemberRemoveHandler;
pub use message_update::MessageUpdateHandler;
pub use ready::ReadyHandler;
pub use remove_friend::RemoveFriendHandler;
pub use role_create::RoleCreateHandler;
pub use user_update::UserUpdateHandler;

use std::sync::Arc;

use crate::dispatch::{Dispatcher, RegistrationError};

/// Build a dispatcher with every supported handler registered
pub fn build_dispatcher() -> Result<Dispatcher, RegistrationError> {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(Arc::new(ReadyHandler))?;
    dispatcher.register(Arc::new(MemberRemoveHandler))?;
    dispatcher.register(Arc::new(RoleCreateHandler))?;
    dispatcher.register(Arc::new(MessageUpdateHandler))?;
    dispatcher.register(Arc::new(RemoveFriendHandler))?;
    dispatcher.register(Arc::new(UserUpdateHandler))?;
    Ok(dispatcher)
}
