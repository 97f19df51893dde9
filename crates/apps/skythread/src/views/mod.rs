//! Text views for skythread

mod thread;

pub use thread::ThreadView;
