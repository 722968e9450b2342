pub(crate) mod compare;
mod dispatch;
pub(crate) mod evaluate;
pub(crate) mod render;
pub(crate) mod workspace;

pub use dispatch::dispatch;

pub mod exit_codes {
    pub use crate::exit_codes::*;
}
