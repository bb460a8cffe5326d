mod id;
mod product_line;
mod session;
mod settings;

pub use id::Id;
pub use product_line::ProductLine;
pub use session::{
    format_modified_timestamp, format_timestamp, ShoppingSession, DATE_FORMAT, MODIFIED_MARKER,
};
pub use settings::{AccentColor, AccentPalette, Appearance, Settings, Theme};
