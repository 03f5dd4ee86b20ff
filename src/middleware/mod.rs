mod access_guard;
mod error_handler;
mod ip_filter;

pub use access_guard::{
    ADMIN_REQUIRED, Access, GuardOptions, LOGIN_REQUIRED, check_access, require_admin,
    require_member,
};
pub use error_handler::log_errors;
pub use ip_filter::{DENIED_PATH, IpFilter, client_ip, ip_filter, ip_in_cidr, is_bypassed};
