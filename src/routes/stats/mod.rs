mod handler;
mod model;

pub use handler::{download_report, stats_page};
pub use model::{
    DATA_REFRESHED, NOT_ENOUGH_DATA, PageLink, Pagination, STATISTICS_UNAVAILABLE, StatsQuery,
    Tab, VOTERS_UNAVAILABLE,
};
