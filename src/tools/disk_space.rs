use log::debug;
use std::path::Path;
use sysinfo::Disks;

/// 取得路徑所在磁碟的可用空間
///
/// 以最長相符的掛載點為準；找不到對應磁碟時回傳 `None`
#[must_use]
pub fn available_space(path: &Path) -> Option<u64> {
    let path = path.canonicalize().ok()?;
    let disks = Disks::new_with_refreshed_list();

    let disk = disks
        .list()
        .iter()
        .filter(|disk| path.starts_with(disk.mount_point()))
        .max_by_key(|disk| disk.mount_point().as_os_str().len())?;

    debug!(
        "{} 位於 {}，可用空間 {} bytes",
        path.display(),
        disk.mount_point().display(),
        disk.available_space()
    );
    Some(disk.available_space())
}

/// 需要的空間（含倍數）是否放得下
#[must_use]
pub fn has_room_for(required_bytes: u64, margin: f64, available: Option<u64>) -> bool {
    match available {
        Some(free) => free as f64 >= required_bytes as f64 * margin,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_room_for_applies_margin() {
        assert!(has_room_for(100, 1.2, Some(120)));
        assert!(!has_room_for(100, 1.2, Some(119)));
        assert!(has_room_for(0, 1.2, Some(0)));
    }

    #[test]
    fn test_unknown_space_does_not_block() {
        assert!(has_room_for(u64::MAX / 2, 1.2, None));
    }
}
