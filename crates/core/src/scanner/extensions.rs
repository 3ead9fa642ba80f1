use std::path::Path;

/// Lowercase extensions (without the dot) treated as audio input.
pub const RECOGNIZED_EXTENSIONS: &[&str] = &[
    "aac", "ac3", "aptx", "aptxhd", "dfpwm", "dts", "eac3", "ec3", "flac", "tco", "rco", "g723_1",
    "mlp", "mp2", "mp3", "m2a", "mpa", "sbc", "msbc", "thd", "tta",
];

/// Whether `path` ends in a recognized audio extension, ignoring case.
pub fn is_recognized(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            RECOGNIZED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
