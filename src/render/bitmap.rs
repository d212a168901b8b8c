use anyhow::Context;
use chrono::NaiveDateTime;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde::Serialize;
use std::io::Cursor;

use super::glyphs::{glyph, text_width, GLYPH_HEIGHT, GLYPH_WIDTH, ADVANCE};
use crate::attendance::{AttendanceReport, Status, GROUP_SIZE};

const COLUMN_WIDTH: u32 = 400;
const MIN_WIDTH: u32 = 800;
const MARGIN_X: u32 = 50;
const HEADER_Y: u32 = 130;
const HEADER_H: u32 = 30;
const FIRST_ROW_BASELINE: u32 = 180;
const ROW_STEP: u32 = 30;
const ROW_H: u32 = 25;

const WHITE: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);
const ACCENT: Rgb<u8> = Rgb([0x4f, 0xac, 0xfe]);
const MUTED: Rgb<u8> = Rgb([0x66, 0x66, 0x66]);
const INK: Rgb<u8> = Rgb([0x33, 0x33, 0x33]);
const PRESENT_FILL: Rgb<u8> = Rgb([0xe6, 0xff, 0xe6]);
const PRESENT_INK: Rgb<u8> = Rgb([0x28, 0xa7, 0x45]);
const ABSENT_FILL: Rgb<u8> = Rgb([0xff, 0xe6, 0xe6]);
const ABSENT_INK: Rgb<u8> = Rgb([0xdc, 0x35, 0x45]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLayout {
    pub width: u32,
    pub height: u32,
    pub columns: u32,
}

impl ImageLayout {
    pub fn for_report(report: &AttendanceReport) -> Self {
        let columns = report.groups.len() as u32;
        ImageLayout {
            width: MIN_WIDTH.max(columns * COLUMN_WIDTH + 100),
            height: 200 + GROUP_SIZE * 35 + 100,
            columns,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

struct Canvas {
    img: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Self {
        Canvas {
            img: RgbImage::from_pixel(width, height, WHITE),
        }
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb<u8>) {
        if x < self.img.width() && y < self.img.height() {
            self.img.put_pixel(x, y, color);
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
        for yy in y..y + h {
            for xx in x..x + w {
                self.put(xx, yy, color);
            }
        }
    }

    /// Two-pixel outline drawn on the inside edge of the rectangle.
    fn stroke_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb<u8>) {
        self.fill_rect(x, y, w, 2, color);
        self.fill_rect(x, y + h - 2, w, 2, color);
        self.fill_rect(x, y, 2, h, color);
        self.fill_rect(x + w - 2, y, 2, h, color);
    }

    /// Draws `text` with its baseline at `baseline`; `x` is the left edge,
    /// centre, or right edge depending on `align`.
    fn text(
        &mut self,
        text: &str,
        x: u32,
        baseline: u32,
        scale: u32,
        align: Align,
        color: Rgb<u8>,
    ) {
        let width = text_width(text, scale);
        let left = match align {
            Align::Left => x,
            Align::Center => x.saturating_sub(width / 2),
            Align::Right => x.saturating_sub(width),
        };
        let top = baseline.saturating_sub(GLYPH_HEIGHT * scale);

        for (i, c) in text.chars().enumerate() {
            let rows = glyph(c);
            let origin = left + i as u32 * ADVANCE * scale;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0x10 >> col) != 0 {
                        self.fill_rect(
                            origin + col * scale,
                            top + row as u32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
    }
}

fn status_text(status: Status) -> &'static str {
    match status {
        Status::Present => "Present ✓",
        Status::Absent => "Absent ✗",
    }
}

fn draw(report: &AttendanceReport, generated_at: NaiveDateTime) -> RgbImage {
    let layout = ImageLayout::for_report(report);
    let mut canvas = Canvas::new(layout.width, layout.height);
    let mid = layout.width / 2;

    canvas.text("Class Attendance Report", mid, 40, 3, Align::Center, ACCENT);
    canvas.text(
        &format!("Generated on: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
        mid,
        70,
        2,
        Align::Center,
        MUTED,
    );
    let stats = format!(
        "Total Students: {} | Present: {} | Absent: {} | Attendance: {}%",
        report.class_size,
        report.present_count,
        report.absent_count,
        report.percentage_label()
    );
    // Narrow images cannot fit the stats line at full size.
    let stats_scale = if text_width(&stats, 2) + 2 * MARGIN_X <= layout.width {
        2
    } else {
        1
    };
    canvas.text(&stats, mid, 95, stats_scale, Align::Center, MUTED);

    let inner_w = COLUMN_WIDTH - 50;
    for (col, group) in report.groups.iter().enumerate() {
        let x = MARGIN_X + col as u32 * COLUMN_WIDTH;

        canvas.fill_rect(x, HEADER_Y, inner_w, HEADER_H, ACCENT);
        canvas.text(
            &format!("Roll No. {} - {}", group.first, group.last),
            x + inner_w / 2,
            HEADER_Y + 20,
            2,
            Align::Center,
            WHITE,
        );

        for (row, entry) in group.entries.iter().enumerate() {
            let baseline = FIRST_ROW_BASELINE + row as u32 * ROW_STEP;
            let top = baseline - 15;
            let (fill, ink) = if entry.status.is_present() {
                (PRESENT_FILL, PRESENT_INK)
            } else {
                (ABSENT_FILL, ABSENT_INK)
            };

            canvas.fill_rect(x, top, inner_w, ROW_H, fill);
            canvas.stroke_rect(x, top, inner_w, ROW_H, ink);
            let label = format!("Roll {}", entry.roll);
            canvas.text(&label, x + 10, baseline + 4, 2, Align::Left, INK);
            canvas.text(
                status_text(entry.status),
                x + COLUMN_WIDTH - 60,
                baseline + 4,
                2,
                Align::Right,
                ink,
            );
        }
    }

    canvas.img
}

/// Renders the report as a PNG: title, timestamp, stats line, then one
/// colour-coded column per group of roll numbers.
pub fn to_png(report: &AttendanceReport, generated_at: NaiveDateTime) -> anyhow::Result<Vec<u8>> {
    let img = draw(report, generated_at);
    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("failed to encode attendance image")?;
    Ok(bytes)
}
