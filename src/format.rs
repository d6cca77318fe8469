const GIB: f64 = (1024u64 * 1024 * 1024) as f64;

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / GIB
}

pub fn format_gb(gb: f64) -> String {
    format!("{gb:.2} GB")
}

pub fn format_percent(percent: f64) -> String {
    format!("{percent:.1}%")
}
