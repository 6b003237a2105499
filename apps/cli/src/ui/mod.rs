pub mod diagnostic;
pub mod table;
pub mod theme;

pub use theme::{Icon, Theme};

pub fn info(message: impl AsRef<str>) {
    println!("{} {}", Theme::primary(Icon::Info), message.as_ref());
}

pub fn warn(message: impl AsRef<str>) {
    println!("{} {}", Theme::warning(Icon::Warning), message.as_ref());
}

pub fn success(message: impl AsRef<str>) {
    println!("{} {}", Theme::success(Icon::Check), message.as_ref());
}

pub fn error(message: impl AsRef<str>) {
    eprintln!("{} {}", Theme::error(Icon::Cross), message.as_ref());
}
