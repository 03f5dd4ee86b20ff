mod handler;
mod model;

pub use handler::{login, login_page, logout};
pub use model::{AUTH_SUCCESS, LoginForm, RFC_REQUIRED, landing_for};
