mod friends;
mod io;
mod settings;

pub use friends::{add_friend, find_friend, mark_friend_updated, remove_friend};
pub use io::ConfigStore;
pub use settings::set_value;
