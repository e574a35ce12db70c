use ratatui::style::Color;

pub const GITHUB_BLUE: Color = Color::Rgb(0x58, 0xa6, 0xff);
pub const GLOBAL_BORDER: Color = Color::Rgb(0x30, 0x36, 0x3d);
pub const HEADER_TEXT: Color = Color::Rgb(0xe6, 0xed, 0xf3);
pub const HEADER_SEPARATOR: Color = Color::Rgb(0x7d, 0x85, 0x90);
pub const MUTED_TEXT: Color = Color::Rgb(0x8b, 0x94, 0x9e);
pub const STATUS_OK: Color = Color::Rgb(0x3f, 0xb9, 0x50);
pub const STATUS_PENDING: Color = Color::Rgb(0xd2, 0x99, 0x22);
pub const STATUS_ERROR: Color = Color::Rgb(0xf8, 0x51, 0x49);
