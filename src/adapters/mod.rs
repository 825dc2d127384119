// Adapters layer: concrete implementations of the domain ports.

pub mod console;
pub mod image_file;

pub use console::ConsoleNotifier;
