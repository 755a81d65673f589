pub mod controller;

pub use controller::{run, Settings};

pub mod reconcilers;
pub use reconcilers::ResourceManager;
