//! Heuristic token names.
//!
//! `rank` arguments are 1-based. Colors are ranked by descending frequency,
//! numeric classes by ascending value.

use convert_case::{Case, Casing};
use std::collections::HashSet;

const PRIMARY_HUES: [(&str, &str); 6] = [
    ("ff0000", "primary-red"),
    ("00ff00", "primary-green"),
    ("0000ff", "primary-blue"),
    ("ffff00", "primary-yellow"),
    ("00ffff", "primary-cyan"),
    ("ff00ff", "primary-magenta"),
];

/// Common spacing steps in pixels and their scale index.
const SPACING_SCALE: [(f64, u32); 10] = [
    (0.0, 0),
    (4.0, 1),
    (8.0, 2),
    (12.0, 3),
    (16.0, 4),
    (20.0, 5),
    (24.0, 6),
    (32.0, 8),
    (40.0, 10),
    (48.0, 12),
];

/// Upper bounds (inclusive) of the named font-size buckets.
const FONT_SIZE_BUCKETS: [(f64, &str); 9] = [
    (12.0, "text-xs"),
    (14.0, "text-sm"),
    (16.0, "text-base"),
    (18.0, "text-lg"),
    (20.0, "text-xl"),
    (24.0, "text-2xl"),
    (30.0, "text-3xl"),
    (36.0, "text-4xl"),
    (48.0, "text-5xl"),
];

/// Semantic color name. `count` is the number of uses folded into the token.
pub fn color_name(value: &str, rank: usize, count: usize) -> String {
    let hex = value.trim().trim_start_matches('#').to_ascii_lowercase();
    if value.trim().starts_with('#') {
        if let Some((_, name)) = PRIMARY_HUES.iter().find(|(h, _)| *h == hex) {
            return name.to_string();
        }
        if let Some(level) = gray_level(&hex) {
            return format!("gray-{}", gray_band(level) * 100);
        }
    }

    if count > 5 {
        format!("primary-{}", rank)
    } else {
        format!("accent-{}", rank)
    }
}

/// Channel value of a `rrggbb` or `rgb` hex gray.
fn gray_level(hex: &str) -> Option<u8> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let bytes = hex.as_bytes();
    match hex.len() {
        6 if hex[0..2] == hex[2..4] && hex[2..4] == hex[4..6] => u8::from_str_radix(&hex[0..2], 16).ok(),
        3 if bytes[0] == bytes[1] && bytes[1] == bytes[2] => {
            u8::from_str_radix(&hex[0..1], 16).ok().map(|d| d * 17)
        }
        _ => None,
    }
}

/// Five brightness bands; 1 is the lightest.
fn gray_band(level: u8) -> u32 {
    (255 - level as u32) * 5 / 256 + 1
}

pub fn font_size_name(px: f64, rank: usize) -> String {
    FONT_SIZE_BUCKETS
        .iter()
        .find(|(max, _)| px <= *max)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("font-size-{}", rank))
}

pub fn spacing_name(px: f64, rank: usize) -> String {
    SPACING_SCALE
        .iter()
        .find(|(step, _)| *step == px)
        .map(|(_, index)| format!("spacing-{}", index))
        .unwrap_or_else(|| format!("spacing-custom-{}", rank))
}

pub fn radius_name(px: f64, rank: usize) -> String {
    let name = if px <= 0.0 {
        "radius-none"
    } else if px <= 3.0 {
        "radius-sm"
    } else if px <= 6.0 {
        "radius-md"
    } else if px <= 12.0 {
        "radius-lg"
    } else if px <= 24.0 {
        "radius-xl"
    } else if px >= 9999.0 {
        "radius-full"
    } else {
        return format!("radius-{}", rank);
    };
    name.to_string()
}

pub fn opacity_name(opacity: f64) -> String {
    let percent = opacity * 100.0;
    let step = if percent <= 0.0 {
        0
    } else if percent <= 25.0 {
        25
    } else if percent <= 50.0 {
        50
    } else if percent <= 75.0 {
        75
    } else {
        100
    };
    format!("opacity-{}", step)
}

pub fn font_family_name(family: &str, rank: usize) -> String {
    let primary = family
        .split(',')
        .next()
        .unwrap_or("")
        .trim()
        .trim_matches(|c| c == '"' || c == '\'');
    let slug = primary.to_case(Case::Kebab);
    if slug.is_empty() {
        format!("font-family-{}", rank)
    } else {
        format!("font-{}", slug)
    }
}

pub fn font_weight_name(weight: &str, rank: usize) -> String {
    let slug = weight.trim().to_case(Case::Kebab);
    if slug.is_empty() {
        format!("font-weight-{}", rank)
    } else {
        format!("font-weight-{}", slug)
    }
}

/// Hands out unique names, suffixing `-2`, `-3`, ... on collision.
#[derive(Debug, Default)]
pub struct NameAllocator {
    taken: HashSet<String>,
}

impl NameAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self, base: String) -> String {
        if self.taken.insert(base.clone()) {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}-{}", base, n);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_hues() {
        assert_eq!(color_name("#ff0000", 1, 1), "primary-red");
        assert_eq!(color_name("#FF0000", 4, 9), "primary-red");
        assert_eq!(color_name("#0000ff", 2, 1), "primary-blue");
    }

    #[test]
    fn test_gray_bands() {
        assert_eq!(color_name("#ffffff", 1, 1), "gray-100");
        assert_eq!(color_name("#000000", 1, 1), "gray-500");
        assert_eq!(color_name("#808080", 1, 1), "gray-300");
        assert_eq!(color_name("#eee", 1, 1), "gray-100");
        assert_eq!(color_name("#333", 1, 1), "gray-400");
    }

    #[test]
    fn test_frequency_fallback() {
        assert_eq!(color_name("#123456", 1, 6), "primary-1");
        assert_eq!(color_name("#123456", 3, 5), "accent-3");
        assert_eq!(color_name("rgb(1, 1, 1)", 2, 1), "accent-2");
    }

    #[test]
    fn test_font_size_buckets() {
        assert_eq!(font_size_name(12.0, 1), "text-xs");
        assert_eq!(font_size_name(13.0, 1), "text-sm");
        assert_eq!(font_size_name(16.0, 1), "text-base");
        assert_eq!(font_size_name(48.0, 1), "text-5xl");
        assert_eq!(font_size_name(64.0, 7), "font-size-7");
    }

    #[test]
    fn test_spacing_scale() {
        assert_eq!(spacing_name(0.0, 1), "spacing-0");
        assert_eq!(spacing_name(8.0, 2), "spacing-2");
        assert_eq!(spacing_name(32.0, 3), "spacing-8");
        assert_eq!(spacing_name(48.0, 4), "spacing-12");
        assert_eq!(spacing_name(10.0, 5), "spacing-custom-5");
    }

    #[test]
    fn test_radius_thresholds() {
        assert_eq!(radius_name(0.0, 1), "radius-none");
        assert_eq!(radius_name(2.0, 1), "radius-sm");
        assert_eq!(radius_name(5.0, 1), "radius-md");
        assert_eq!(radius_name(12.0, 1), "radius-lg");
        assert_eq!(radius_name(20.0, 1), "radius-xl");
        assert_eq!(radius_name(9999.0, 1), "radius-full");
        assert_eq!(radius_name(100.0, 6), "radius-6");
    }

    #[test]
    fn test_opacity_steps() {
        assert_eq!(opacity_name(0.0), "opacity-0");
        assert_eq!(opacity_name(0.2), "opacity-25");
        assert_eq!(opacity_name(0.5), "opacity-50");
        assert_eq!(opacity_name(0.7), "opacity-75");
        assert_eq!(opacity_name(1.0), "opacity-100");
    }

    #[test]
    fn test_font_names() {
        assert_eq!(font_family_name("Inter, sans-serif", 1), "font-inter");
        assert_eq!(font_family_name("'Open Sans'", 1), "font-open-sans");
        assert_eq!(font_weight_name("bold", 1), "font-weight-bold");
        assert_eq!(font_weight_name("700", 1), "font-weight-700");
    }

    #[test]
    fn test_name_allocator_suffixes_collisions() {
        let mut names = NameAllocator::new();
        assert_eq!(names.allocate("gray-500".into()), "gray-500");
        assert_eq!(names.allocate("gray-500".into()), "gray-500-2");
        assert_eq!(names.allocate("gray-500".into()), "gray-500-3");
    }
}
