use std::collections::HashMap;

use image::Rgb;
use image::imageops::ColorMap;

/// The 256-entry Plan 9 color map.
///
/// Built from its closed form: a 4x4x4 RGB cube where each cell is split into
/// four brightness steps (`v`). The `r == g == b` diagonal yields a 16-step
/// gray ramp.
#[derive(Clone, Debug)]
pub struct Plan9Palette {
    colors: [[u8; 3]; 256],
    exact: HashMap<[u8; 3], u8>,
}

impl Default for Plan9Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Plan9Palette {
    pub fn new() -> Self {
        let colors = plan9_colors();
        let mut exact = HashMap::with_capacity(colors.len());
        for (i, c) in colors.iter().enumerate() {
            // First index wins for duplicate entries, matching the linear scan.
            exact.entry(*c).or_insert(i as u8);
        }
        Self { colors, exact }
    }

    pub fn colors(&self) -> &[[u8; 3]; 256] {
        &self.colors
    }

    /// Flattened `r,g,b` triples for a GIF global color table.
    pub fn to_rgb_table(&self) -> Vec<u8> {
        self.colors.iter().flatten().copied().collect()
    }

    /// Index of the closest palette entry by squared RGB distance.
    pub fn nearest(&self, rgb: [u8; 3]) -> u8 {
        if let Some(&i) = self.exact.get(&rgb) {
            return i;
        }
        let mut best = 0u8;
        let mut best_dist = u32::MAX;
        for (i, c) in self.colors.iter().enumerate() {
            let dist = sq_diff(c[0], rgb[0]) + sq_diff(c[1], rgb[1]) + sq_diff(c[2], rgb[2]);
            if dist < best_dist {
                best_dist = dist;
                best = i as u8;
                if dist == 0 {
                    break;
                }
            }
        }
        best
    }
}

impl ColorMap for Plan9Palette {
    type Color = Rgb<u8>;

    fn index_of(&self, color: &Rgb<u8>) -> usize {
        usize::from(self.nearest(color.0))
    }

    fn lookup(&self, index: usize) -> Option<Rgb<u8>> {
        self.colors.get(index).map(|c| Rgb(*c))
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Rgb<u8>) {
        let i = self.nearest(color.0);
        color.0 = self.colors[usize::from(i)];
    }
}

fn sq_diff(a: u8, b: u8) -> u32 {
    let d = u32::from(a.abs_diff(b));
    d * d
}

fn plan9_colors() -> [[u8; 3]; 256] {
    let mut out = [[0u8; 3]; 256];
    let mut base = 0usize;
    for r in 0..4i32 {
        for v in 0..4i32 {
            let mut j = v - r;
            for g in 0..4i32 {
                for b in 0..4i32 {
                    let den = r.max(g).max(b);
                    let rgb = if den == 0 {
                        let c = (17 * v) as u8;
                        [c, c, c]
                    } else {
                        let num = 17 * (4 * den + v);
                        [
                            (r * num / den) as u8,
                            (g * num / den) as u8,
                            (b * num / den) as u8,
                        ]
                    };
                    out[base + (j & 0x0f) as usize] = rgb;
                    j += 1;
                }
            }
            base += 16;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/encode/palette.rs"]
mod tests;
