pub mod message;
pub mod model;
pub mod reload;
pub mod update;

pub use message::{Command, Message, ReloadResult};
pub use model::App;
pub use reload::Reloader;
pub use update::update;
