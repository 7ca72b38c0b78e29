mod posts;
mod users;

pub use posts::{PER_PAGE, PostAccess, PostStore};
pub use users::{DEFAULT_AVATAR, UserError, UserStore};
