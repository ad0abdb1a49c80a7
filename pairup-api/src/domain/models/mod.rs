mod ids;
mod photo;
mod update;
mod user;

pub use ids::*;
pub use photo::*;
pub use update::*;
pub use user::*;
