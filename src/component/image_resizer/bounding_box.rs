use anyhow::{Result, bail};

/// HQ 與 LQ 的固定倍率
pub const PAIR_SCALE: u32 = 4;

/// 縮放上限（寬、高）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub max_width: u32,
    pub max_height: u32,
}

/// 成對縮放後的新尺寸
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairDimensions {
    pub hq: (u32, u32),
    pub lq: (u32, u32),
}

impl BoundingBox {
    #[must_use]
    pub const fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width,
            max_height,
        }
    }

    #[must_use]
    pub const fn exceeds(&self, width: u32, height: u32) -> bool {
        width > self.max_width || height > self.max_height
    }

    fn scale_for(&self, width: u32, height: u32) -> f64 {
        let width_scale = f64::from(self.max_width) / f64::from(width);
        let height_scale = f64::from(self.max_height) / f64::from(height);
        width_scale.min(height_scale)
    }

    /// 超出範圍時回傳等比例縮小後的尺寸，否則回傳 `None`
    pub fn fit(&self, width: u32, height: u32) -> Result<Option<(u32, u32)>> {
        if !self.exceeds(width, height) {
            return Ok(None);
        }

        let scale = self.scale_for(width, height);
        let new_width = (f64::from(width) * scale) as u32;
        let new_height = (f64::from(height) * scale) as u32;

        if new_width == 0 || new_height == 0 {
            bail!("{width}x{height} collapses to {new_width}x{new_height} when fitted");
        }
        Ok(Some((new_width, new_height)))
    }

    /// 依 HQ 尺寸決定成對縮放；HQ 取 4 的倍數，LQ 為 HQ 的四分之一
    pub fn fit_pair(&self, hq_width: u32, hq_height: u32) -> Result<Option<PairDimensions>> {
        if !self.exceeds(hq_width, hq_height) {
            return Ok(None);
        }

        let scale = self.scale_for(hq_width, hq_height);
        let new_hq_width = ((f64::from(hq_width) * scale) as u32 / PAIR_SCALE) * PAIR_SCALE;
        let new_hq_height = ((f64::from(hq_height) * scale) as u32 / PAIR_SCALE) * PAIR_SCALE;

        if new_hq_width == 0 || new_hq_height == 0 {
            bail!("{hq_width}x{hq_height} is too small to keep a {PAIR_SCALE}x pair after fitting");
        }

        Ok(Some(PairDimensions {
            hq: (new_hq_width, new_hq_height),
            lq: (new_hq_width / PAIR_SCALE, new_hq_height / PAIR_SCALE),
        }))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new(1920, 1080)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_box_is_untouched() {
        let bbox = BoundingBox::default();
        assert_eq!(bbox.fit(1920, 1080).unwrap(), None);
        assert_eq!(bbox.fit(800, 600).unwrap(), None);
        assert_eq!(bbox.fit_pair(1920, 1080).unwrap(), None);
    }

    #[test]
    fn test_fit_landscape() {
        let bbox = BoundingBox::default();
        assert_eq!(bbox.fit(3840, 2160).unwrap(), Some((1920, 1080)));
        assert_eq!(bbox.fit(4000, 1000).unwrap(), Some((1920, 480)));
    }

    #[test]
    fn test_fit_portrait_limited_by_height() {
        let bbox = BoundingBox::default();
        assert_eq!(bbox.fit(1080, 1920).unwrap(), Some((607, 1080)));
    }

    #[test]
    fn test_fit_stays_in_box_and_keeps_aspect() {
        let bbox = BoundingBox::default();
        for (w, h) in [
            (1921, 1080),
            (1920, 1081),
            (5000, 3333),
            (2001, 4999),
            (12345, 77),
            (333, 9000),
            (2560, 1440),
        ] {
            let (nw, nh) = bbox.fit(w, h).unwrap().unwrap();
            assert!(nw <= bbox.max_width && nh <= bbox.max_height, "{w}x{h} -> {nw}x{nh}");
            // 以較長邊推算較短邊
            let (expected, actual) = if w >= h {
                (f64::from(nw) * f64::from(h) / f64::from(w), f64::from(nh))
            } else {
                (f64::from(nh) * f64::from(w) / f64::from(h), f64::from(nw))
            };
            assert!(
                (expected - actual).abs() <= 1.0,
                "{w}x{h} -> {nw}x{nh} distorts the aspect ratio"
            );
        }
    }

    #[test]
    fn test_fit_rejects_degenerate_result() {
        let bbox = BoundingBox::new(10, 10);
        assert!(bbox.fit(100_000, 1).is_err());
    }

    #[test]
    fn test_fit_pair_keeps_exact_ratio() {
        let bbox = BoundingBox::default();
        let dims = bbox.fit_pair(3000, 2000).unwrap().unwrap();
        // 3000x2000 * 0.54 = 1620x1080
        assert_eq!(dims.hq, (1620, 1080));
        assert_eq!(dims.lq, (405, 270));

        for (w, h) in [(2001, 1999), (4097, 3071), (1923, 1085)] {
            let dims = bbox.fit_pair(w, h).unwrap().unwrap();
            assert_eq!(dims.hq.0 % PAIR_SCALE, 0);
            assert_eq!(dims.hq.1 % PAIR_SCALE, 0);
            assert_eq!(dims.lq.0 * PAIR_SCALE, dims.hq.0);
            assert_eq!(dims.lq.1 * PAIR_SCALE, dims.hq.1);
            assert!(dims.hq.0 <= bbox.max_width && dims.hq.1 <= bbox.max_height);
        }
    }

    #[test]
    fn test_fit_pair_rejects_tiny_result() {
        let bbox = BoundingBox::new(4, 4);
        assert!(bbox.fit_pair(100, 5).is_err());
    }
}
