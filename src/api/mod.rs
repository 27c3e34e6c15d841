pub mod flash;
pub mod format;

pub use flash::{Flash, FlashKind, FlashQuery};
pub use format::{format_currency, format_number, format_percent, MISSING};
