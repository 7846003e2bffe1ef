use anyhow::{Result, bail};

/// 分隔線：黑、白各 1px
pub const SEPARATOR_WIDTH: u32 = 2;
pub const LABEL_PADDING: u32 = 5;

/// 單一面板在合成圖中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strip {
    /// 從面板取樣的起始欄
    pub source_x: u32,
    pub width: u32,
    /// 在合成圖中的起始欄
    pub dest_x: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StripLayout {
    pub strips: Vec<Strip>,
    pub width: u32,
    pub height: u32,
}

/// 依目標高度換算的面板寬度
#[must_use]
pub fn scaled_width(width: u32, height: u32, target_height: u32) -> u32 {
    (u64::from(target_height) * u64::from(width) / u64::from(height.max(1))) as u32
}

/// 依各面板（已縮放至同高）寬度規劃條帶
///
/// 第 i 個面板（非最後）取第 i 段，最後一個取最右邊一段
pub fn plan_strips(panel_widths: &[u32], height: u32) -> Result<StripLayout> {
    let count = panel_widths.len() as u32;
    if count < 2 {
        bail!("A comparison needs at least two panels");
    }

    let mut strips = Vec::with_capacity(panel_widths.len());
    let mut dest_x = 0;
    for (i, &panel_width) in panel_widths.iter().enumerate() {
        let strip_width = panel_width / count;
        if strip_width == 0 {
            bail!("Panel {} is too narrow ({panel_width}px) to split", i + 1);
        }

        let is_last = i as u32 == count - 1;
        let source_x = if is_last {
            panel_width - strip_width
        } else {
            i as u32 * strip_width
        };

        strips.push(Strip {
            source_x,
            width: strip_width,
            dest_x,
        });
        dest_x += strip_width + SEPARATOR_WIDTH;
    }

    let width = dest_x - SEPARATOR_WIDTH;
    Ok(StripLayout {
        strips,
        width,
        height,
    })
}
