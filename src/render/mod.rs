mod bitmap;
mod csv;
mod glyphs;
mod markup;

pub use self::bitmap::{to_png, ImageLayout};
pub use self::csv::to_csv;
pub use self::markup::to_markup;

use chrono::NaiveDate;

pub fn image_file_name(date: NaiveDate) -> String {
    format!("attendance_{}.png", date.format("%Y-%m-%d"))
}

pub fn csv_file_name(date: NaiveDate) -> String {
    format!("attendance_report_{}.csv", date.format("%Y-%m-%d"))
}
