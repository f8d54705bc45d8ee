//! Domain entities

mod channel;
mod guild;
mod invite;
mod member;
mod message;
mod role;
mod user;

pub use channel::{Channel, ChannelType};
pub use guild::Guild;
pub use invite::{Invite, generate_invite_code};
pub use member::GuildMember;
pub use message::{Embed, Message};
pub use role::Role;
pub use user::{User, UserPatch, UserStatus};
