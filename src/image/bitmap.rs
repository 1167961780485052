//! RGB 输出缓冲区到显示格式的转换

use crate::error::{AmiVideoError, Result};
use crate::geometry::{ScreenGeometry, ensure_len};
use crate::image::palette::OutputColor;
use image::{Rgba, RgbaImage};

/// 展开为每像素 4 字节 (r, g, b, unused) 的字节数组
pub fn to_rgba_bytes(colors: &[OutputColor]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(colors.len() * 4);

    for color in colors {
        bytes.extend_from_slice(&[color.r, color.g, color.b, color.unused]);
    }

    bytes
}

/// 创建 `width x height` 的图像, 跳过每行的填充像素
///
/// 透明度固定为 255。
pub fn to_rgba_image(colors: &[OutputColor], geometry: &ScreenGeometry) -> Result<RgbaImage> {
    geometry.validate_dimensions()?;
    ensure_len(colors.len(), geometry.chunky_size())?;

    let (Ok(width), Ok(height)) = (u32::try_from(geometry.width), u32::try_from(geometry.height))
    else {
        return Err(AmiVideoError::InvalidGeometry {
            width: geometry.width,
            height: geometry.height,
            pitch: geometry.pitch,
        });
    };

    tracing::debug!("创建 RGBA 图像: {}x{}", width, height);

    let image = RgbaImage::from_fn(width, height, |x, y| {
        let color = colors[y as usize * geometry.pitch + x as usize];
        Rgba([color.r, color.g, color.b, 255])
    });

    Ok(image)
}
