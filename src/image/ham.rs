//! chunky 像素到 RGB 的解码, 包括 Hold-and-Modify (HAM) 模式
//!
//! HAM 模式下每个像素的最高 2 位是控制码, 其余位是数据:
//! - `00`: 数据是调色板索引
//! - `01`: 保持上一像素的 R、G, 数据替换 B
//! - `10`: 保持上一像素的 G、B, 数据替换 R
//! - `11`: 保持上一像素的 R、B, 数据替换 G
//!
//! "上一像素" 在每条扫描线开头重置为调色板第 0 项。

use crate::error::{AmiVideoError, Result};
use crate::geometry::{ScreenGeometry, ensure_len};
use crate::image::bitplane::bitplanes_to_chunky;
use crate::image::palette::{OutputColor, SourceColor, compute_palette};
use crate::viewport::DisplayModeFlags;

/// HAM 控制码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HamControl {
    Palette,
    ModifyBlue,
    ModifyRed,
    ModifyGreen,
}

impl HamControl {
    fn from_bits(bits: u8) -> Self {
        match bits & 0x3 {
            0x0 => HamControl::Palette,
            0x1 => HamControl::ModifyBlue,
            0x2 => HamControl::ModifyRed,
            _ => HamControl::ModifyGreen,
        }
    }
}

/// 单条扫描线内的 HAM 解码状态
struct HamScanLine<'a> {
    palette: &'a [OutputColor],
    control_shift: u32,
    level_shift: u32,
    previous: OutputColor,
}

impl<'a> HamScanLine<'a> {
    fn new(palette: &'a [OutputColor], depth: usize) -> Result<Self> {
        let previous = lookup(palette, 0)?;
        let control_shift = (depth - 2) as u32;

        Ok(Self {
            palette,
            control_shift,
            level_shift: 8 - control_shift,
            previous,
        })
    }

    fn decode(&mut self, byte: u8) -> Result<OutputColor> {
        let control = HamControl::from_bits(byte >> self.control_shift);
        let index = u32::from(byte) & !(0x3 << self.control_shift);
        // depth 为 2 时数据位为 0, 移 8 位后截断为 0
        let level = (index << self.level_shift) as u8;

        let mut color = self.previous;
        match control {
            HamControl::Palette => color = lookup(self.palette, index as usize)?,
            HamControl::ModifyBlue => color.b = level,
            HamControl::ModifyRed => color.r = level,
            HamControl::ModifyGreen => color.g = level,
        }

        self.previous = color;
        Ok(color)
    }
}

#[inline]
fn lookup(palette: &[OutputColor], index: usize) -> Result<OutputColor> {
    palette.get(index).copied().ok_or_else(|| {
        tracing::error!("调色板索引超出范围: {} (长度 {})", index, palette.len());
        AmiVideoError::PaletteIndexOutOfRange {
            index,
            len: palette.len(),
        }
    })
}

/// 将 chunky 像素转换为 RGB 颜色
///
/// 结果长度为 `pitch * height`。普通模式下每个字节 (包括行尾填充) 都直接查表;
/// HAM 模式下只解码每行前 `width` 个像素, 行尾填充为调色板第 0 项。
/// 同时设置 HAM 和 EHB 时按 HAM 处理。
pub fn chunky_to_rgb<M: DisplayModeFlags + ?Sized>(
    pixels: &[u8],
    geometry: &ScreenGeometry,
    palette: &[OutputColor],
    viewport_mode: &M,
) -> Result<Vec<OutputColor>> {
    let ham = viewport_mode.is_hold_and_modify();

    if ham {
        geometry.validate_ham()?;
    } else {
        geometry.validate()?;
    }
    ensure_len(pixels.len(), geometry.chunky_size())?;

    tracing::debug!(
        "chunky 转 RGB: {}x{}, pitch={}, depth={}, HAM={}",
        geometry.width,
        geometry.height,
        geometry.pitch,
        geometry.depth,
        ham
    );

    let pixels = &pixels[..geometry.chunky_size()];

    if ham {
        let background = lookup(palette, 0)?;
        let mut result = vec![background; geometry.chunky_size()];

        for (row, out) in pixels
            .chunks_exact(geometry.pitch)
            .zip(result.chunks_exact_mut(geometry.pitch))
        {
            let mut scan_line = HamScanLine::new(palette, geometry.depth)?;
            for (&byte, color) in row[..geometry.width].iter().zip(out.iter_mut()) {
                *color = scan_line.decode(byte)?;
            }
        }

        Ok(result)
    } else {
        pixels
            .iter()
            .map(|&byte| lookup(palette, byte as usize))
            .collect()
    }
}

/// 将连续存放的位平面直接转换为 RGB 颜色
pub fn bitplanes_to_rgb<M: DisplayModeFlags + ?Sized>(
    bitplanes: &[u8],
    geometry: &ScreenGeometry,
    colors: &[SourceColor],
    num_of_color_bits: u32,
    viewport_mode: &M,
) -> Result<Vec<OutputColor>> {
    if viewport_mode.is_hold_and_modify() {
        geometry.validate_ham()?;
    }

    let pixels = bitplanes_to_chunky(bitplanes, geometry)?;
    let palette = compute_palette(colors, num_of_color_bits, viewport_mode)?;
    chunky_to_rgb(&pixels, geometry, &palette, viewport_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::bitplane::chunky_to_bitplanes;
    use crate::viewport::ViewportMode;

    const BLACK: OutputColor = OutputColor::black();
    const WHITE: OutputColor = OutputColor::white();

    #[test]
    fn test_normal_lookup() {
        let geometry = ScreenGeometry::new(4, 1, 1);
        let rgb = chunky_to_rgb(&[0, 1, 1, 0], &geometry, &[BLACK, WHITE], &ViewportMode::NORMAL)
            .unwrap();
        assert_eq!(rgb, vec![BLACK, WHITE, WHITE, BLACK]);
    }

    #[test]
    fn test_normal_looks_up_padding() {
        let geometry = ScreenGeometry::new(2, 1, 1).with_pitch(4);
        let rgb = chunky_to_rgb(&[1, 1, 0, 0], &geometry, &[BLACK, WHITE], &ViewportMode::NORMAL)
            .unwrap();
        assert_eq!(rgb, vec![WHITE, WHITE, BLACK, BLACK]);
    }

    #[test]
    fn test_normal_index_out_of_range() {
        let geometry = ScreenGeometry::new(2, 1, 2);
        assert!(matches!(
            chunky_to_rgb(&[0, 3], &geometry, &[BLACK, WHITE], &ViewportMode::NORMAL),
            Err(AmiVideoError::PaletteIndexOutOfRange { index: 3, len: 2 })
        ));
    }

    #[test]
    fn test_ham6_modify_channels() {
        let geometry = ScreenGeometry::new(5, 1, 6);
        let palette = [OutputColor::new(16, 32, 48), OutputColor::new(1, 2, 3)];
        let pixels = [
            0b00_0001, // 调色板 1
            0b01_1111, // B = 15 << 4
            0b10_1000, // R = 8 << 4
            0b11_0010, // G = 2 << 4
            0b00_0000, // 调色板 0
        ];

        let rgb = chunky_to_rgb(&pixels, &geometry, &palette, &ViewportMode::HOLD_AND_MODIFY)
            .unwrap();
        assert_eq!(
            rgb,
            vec![
                OutputColor::new(1, 2, 3),
                OutputColor::new(1, 2, 240),
                OutputColor::new(128, 2, 240),
                OutputColor::new(128, 32, 240),
                OutputColor::new(16, 32, 48),
            ]
        );
    }

    #[test]
    fn test_ham8_level_shift() {
        let geometry = ScreenGeometry::new(1, 1, 8);
        let palette = [BLACK];
        // 控制码 10, 数据 0x3F -> R = 0x3F << 2
        let rgb = chunky_to_rgb(&[0b1011_1111], &geometry, &palette, &ViewportMode::HOLD_AND_MODIFY)
            .unwrap();
        assert_eq!(rgb, vec![OutputColor::new(0xFC, 0, 0)]);
    }

    #[test]
    fn test_ham_state_resets_each_row() {
        let geometry = ScreenGeometry::new(2, 4, 6);
        let palette = [OutputColor::new(16, 16, 16), OutputColor::new(200, 100, 50)];
        let pixels = [
            0b00_0001, 0b01_0011, // 第一行末尾是 (200, 100, 48)
            0b01_0101, 0b10_0001, // 以下每行都从调色板 0 开始
            0b10_0101, 0b00_0001,
            0b11_0101, 0b01_0000,
        ];

        let rgb = chunky_to_rgb(&pixels, &geometry, &palette, &ViewportMode::HOLD_AND_MODIFY)
            .unwrap();
        assert_eq!(rgb[1], OutputColor::new(200, 100, 48));
        assert_eq!(rgb[2], OutputColor::new(16, 16, 80));
        assert_eq!(rgb[3], OutputColor::new(16, 16, 80));
        assert_eq!(rgb[4], OutputColor::new(80, 16, 16));
        assert_eq!(rgb[5], OutputColor::new(200, 100, 50));
        assert_eq!(rgb[6], OutputColor::new(16, 80, 16));
        assert_eq!(rgb[7], OutputColor::new(16, 80, 0));
    }

    #[test]
    fn test_ham_padding_uses_background() {
        let geometry = ScreenGeometry::new(2, 1, 6).with_pitch(4);
        let palette = [OutputColor::new(1, 1, 1)];
        let pixels = [0b01_1111, 0b10_1111, 0b11_1111, 0b11_1111];

        let rgb = chunky_to_rgb(&pixels, &geometry, &palette, &ViewportMode::HOLD_AND_MODIFY)
            .unwrap();
        assert_eq!(rgb[1], OutputColor::new(240, 1, 240));
        assert_eq!(rgb[2], OutputColor::new(1, 1, 1));
        assert_eq!(rgb[3], OutputColor::new(1, 1, 1));
    }

    #[test]
    fn test_ham_depth_two() {
        let geometry = ScreenGeometry::new(4, 1, 2);
        let palette = [OutputColor::new(50, 60, 70)];

        let rgb = chunky_to_rgb(&[0, 1, 2, 3], &geometry, &palette, &ViewportMode::HOLD_AND_MODIFY)
            .unwrap();
        assert_eq!(
            rgb,
            vec![
                OutputColor::new(50, 60, 70),
                OutputColor::new(50, 60, 0),
                OutputColor::new(0, 60, 0),
                OutputColor::new(0, 0, 0),
            ]
        );
    }

    #[test]
    fn test_ham_invalid_depth() {
        let geometry = ScreenGeometry::new(4, 1, 1);
        assert!(matches!(
            chunky_to_rgb(&[0; 4], &geometry, &[BLACK], &ViewportMode::HOLD_AND_MODIFY),
            Err(AmiVideoError::InvalidBitplaneDepth(1))
        ));
    }

    #[test]
    fn test_ham_takes_priority_over_ehb() {
        let geometry = ScreenGeometry::new(2, 1, 6);
        let palette = [BLACK];
        let mode = ViewportMode::HOLD_AND_MODIFY | ViewportMode::EXTRA_HALFBRITE;

        let rgb = chunky_to_rgb(&[0b01_1111, 0b11_0001], &geometry, &palette, &mode).unwrap();
        assert_eq!(rgb, vec![OutputColor::new(0, 0, 240), OutputColor::new(0, 16, 240)]);
    }

    #[test]
    fn test_geometry_overflow() {
        let huge = ScreenGeometry::new(usize::MAX / 8, usize::MAX / 8, 1);
        assert!(matches!(
            chunky_to_rgb(&[], &huge, &[BLACK], &ViewportMode::NORMAL),
            Err(AmiVideoError::InvalidGeometry { .. })
        ));

        let huge_ham = ScreenGeometry::new(usize::MAX / 8, usize::MAX / 8, 6);
        assert!(matches!(
            chunky_to_rgb(&[], &huge_ham, &[BLACK], &ViewportMode::HOLD_AND_MODIFY),
            Err(AmiVideoError::InvalidGeometry { .. })
        ));
    }

    #[test]
    fn test_chunky_too_small() {
        let geometry = ScreenGeometry::new(4, 2, 1);
        assert!(matches!(
            chunky_to_rgb(&[0; 7], &geometry, &[BLACK, WHITE], &ViewportMode::NORMAL),
            Err(AmiVideoError::SizeMismatch { expected: 8, actual: 7 })
        ));
    }

    #[test]
    fn test_bitplanes_to_rgb_ehb() {
        crate::init_test_logging();

        let width = 16;
        let geometry = ScreenGeometry::new(width, 1, 6);
        let mut pixels = vec![0u8; width];
        pixels[0] = 1;
        pixels[1] = 33;
        let planar = chunky_to_bitplanes(&pixels, width, 1, 6).unwrap();

        let mut colors = vec![SourceColor::default(); 32];
        colors[1] = SourceColor::new(15, 10, 4);

        let rgb = bitplanes_to_rgb(&planar, &geometry, &colors, 4, &ViewportMode::EXTRA_HALFBRITE)
            .unwrap();
        assert_eq!(rgb.len(), width);
        assert_eq!(rgb[0], OutputColor::new(240, 160, 64));
        assert_eq!(rgb[1], OutputColor::new(112, 80, 32));
        assert_eq!(rgb[2], BLACK);
    }

    #[test]
    fn test_bitplanes_to_rgb_ham() {
        let geometry = ScreenGeometry::new(16, 1, 6);
        let mut pixels = vec![0u8; 16];
        pixels[0] = 0b10_1111;
        let planar = chunky_to_bitplanes(&pixels, 16, 1, 6).unwrap();

        let rgb = bitplanes_to_rgb(
            &planar,
            &geometry,
            &[SourceColor::new(0, 0, 15)],
            4,
            &ViewportMode::HOLD_AND_MODIFY,
        )
        .unwrap();
        assert_eq!(rgb[0], OutputColor::new(240, 0, 240));
        assert_eq!(rgb[1], OutputColor::new(0, 0, 240));
    }
}
