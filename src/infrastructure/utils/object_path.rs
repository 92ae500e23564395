use chrono::{DateTime, Utc};
use rand::Rng;

use crate::constants::SCREENSHOT_PREFIX;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

pub fn random_suffix(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}

/// `screenshots/{unix_millis}-{6 base36 chars}.{ext}`
pub fn screenshot_object_path(extension: &str, now: DateTime<Utc>) -> String {
    format!(
        "{}/{}-{}.{}",
        SCREENSHOT_PREFIX,
        now.timestamp_millis(),
        random_suffix(6),
        extension
    )
}
