//! Human-readable renderings used for the `/String` field variants.

/// Groups digits in threes with spaces: `1411200` → `1 411 200`.
pub fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Three significant digits, the way sizes and rates are usually shown.
fn three_digits(value: f64) -> String {
    if value >= 100.0 {
        format!("{value:.0}")
    } else if value >= 10.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

/// `3 s 494 ms`, `1 min 27 s`, `1 h 2 min`.
pub fn duration(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = ms / 60_000 % 60;
    let seconds = ms / 1000 % 60;
    let millis = ms % 1000;
    if hours > 0 {
        format!("{hours} h {minutes} min")
    } else if minutes > 0 {
        format!("{minutes} min {seconds} s")
    } else if seconds > 0 {
        format!("{seconds} s {millis} ms")
    } else {
        format!("{millis} ms")
    }
}

/// `00:01:27.771`
pub fn duration_clock(ms: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}.{:03}",
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1000 % 60,
        ms % 1000
    )
}

/// `128 kb/s`, `1 411 kb/s`, `12.3 Mb/s`
pub fn bit_rate(bps: u64) -> String {
    if bps >= 10_000_000 {
        format!("{:.1} Mb/s", bps as f64 / 1_000_000.0)
    } else if bps >= 1000 {
        format!("{} kb/s", group_digits((bps + 500) / 1000))
    } else {
        format!("{bps} b/s")
    }
}

/// `512 Bytes`, `42.7 KiB`, `1.23 MiB`
pub fn file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} Bytes");
    }
    let mut value = bytes as f64;
    let mut unit = "Bytes";
    for candidate in UNITS {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = candidate;
    }
    format!("{} {unit}", three_digits(value))
}

/// `44.1 kHz`, `8 000 Hz`
pub fn sampling_rate(hz: u64) -> String {
    if hz >= 10_000 {
        format!("{:.1} kHz", hz as f64 / 1000.0)
    } else {
        format!("{} Hz", group_digits(hz))
    }
}

pub fn channels(count: u64) -> String {
    if count == 1 {
        "1 channel".to_owned()
    } else {
        format!("{count} channels")
    }
}

pub fn pixels(count: u64) -> String {
    format!("{} pixels", group_digits(count))
}

pub fn frame_rate(fps: f64) -> String {
    format!("{fps:.3} FPS")
}

pub fn bit_depth(bits: u64) -> String {
    format!("{bits} bits")
}

pub fn bit_rate_mode(mode: &str) -> Option<&'static str> {
    match mode {
        "CBR" => Some("Constant"),
        "VBR" => Some("Variable"),
        _ => None,
    }
}

/// Maps a width/height ratio to its common name (`16:9`), or three decimals.
pub fn aspect_ratio(ratio: f64) -> String {
    const NAMED: [(f64, &str); 7] = [
        (1.0, "1:1"),
        (1.25, "5:4"),
        (4.0 / 3.0, "4:3"),
        (1.5, "3:2"),
        (16.0 / 9.0, "16:9"),
        (1.85, "1.85:1"),
        (2.35, "2.35:1"),
    ];
    NAMED
        .iter()
        .find(|(value, _)| (ratio - value).abs() < 0.01)
        .map_or_else(|| format!("{ratio:.3}"), |(_, name)| (*name).to_owned())
}
