pub mod app;
pub mod donator;
pub mod event;
pub mod history;
pub mod request;
pub mod supply;

pub use app::AppState;
pub use donator::Donator;
