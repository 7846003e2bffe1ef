//! 標籤文字繪製
//!
//! 字型從設定檔指定的路徑或常見系統字型載入；找不到字型時不畫標籤

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

const STROKE_WIDTH: i32 = 1;
const TEXT_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const STROKE_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "C:/Windows/Fonts/arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
];

pub struct LabelFont {
    font: FontVec,
    scale: PxScale,
}

impl LabelFont {
    /// 依序嘗試設定路徑與系統字型
    #[must_use]
    pub fn load(configured: Option<&str>, size: f32) -> Option<Self> {
        let candidates = configured
            .map(PathBuf::from)
            .into_iter()
            .chain(SYSTEM_FONT_CANDIDATES.iter().map(PathBuf::from));

        for path in candidates {
            if let Some(font) = Self::from_file(&path, size) {
                debug!("使用字型: {}", path.display());
                return Some(font);
            }
        }

        warn!("找不到可用字型，標籤將不會繪製");
        None
    }

    #[must_use]
    pub fn from_file(path: &Path, size: f32) -> Option<Self> {
        let data = fs::read(path).ok()?;
        let font = FontVec::try_from_vec(data).ok()?;
        Some(Self {
            font,
            scale: PxScale::from(size),
        })
    }

    #[must_use]
    pub fn line_height(&self) -> u32 {
        self.scale.y.ceil() as u32
    }

    #[must_use]
    pub fn text_width(&self, text: &str) -> u32 {
        text_size(self.scale, &self.font, text).0
    }

    /// 白字黑框：先在周圍一圈畫黑色，再於中心畫白色
    pub fn draw_text_with_stroke(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str) {
        for dx in -STROKE_WIDTH..=STROKE_WIDTH {
            for dy in -STROKE_WIDTH..=STROKE_WIDTH {
                if dx == 0 && dy == 0 {
                    continue;
                }
                draw_text_mut(
                    canvas,
                    STROKE_COLOR,
                    x + dx,
                    y + dy,
                    self.scale,
                    &self.font,
                    text,
                );
            }
        }
        draw_text_mut(canvas, TEXT_COLOR, x, y, self.scale, &self.font, text);
    }

    /// 單色文字（預覽圖說明欄使用）
    pub fn draw_text(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_font_file_returns_none() {
        assert!(LabelFont::from_file(Path::new("/no/such/font.ttf"), 15.0).is_none());
    }

    #[test]
    fn test_non_font_file_returns_none() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        fs::write(temp.path(), b"definitely not a font").unwrap();
        assert!(LabelFont::from_file(temp.path(), 15.0).is_none());
    }
}
