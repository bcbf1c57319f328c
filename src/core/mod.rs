// Core logic exports
pub mod dispatcher;
pub mod replies;
pub mod sizing;

pub use dispatcher::{Dispatcher, Route};
pub use sizing::{chart_for, classify, MEN_CHART, WOMEN_CHART};
