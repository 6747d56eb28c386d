mod xdg;

pub use xdg::XdgIndexStore;
