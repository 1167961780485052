//! 位平面 (planar) 与 chunky 像素格式互转
//!
//! 位平面格式中每个颜色位单独存放为一张位图, 每个字节的最高位对应最左边的像素。
//! chunky 格式中每个像素占一个字节, 直接保存调色板索引。

use crate::error::{AmiVideoError, Result};
use crate::geometry::{ScreenGeometry, ensure_len, scan_line_size};

/// 按索引访问位平面数据
pub trait Bitplanes {
    /// 位平面数量
    fn plane_count(&self) -> usize;

    /// 获取第 `index` 个位平面
    fn plane(&self, index: usize) -> &[u8];
}

/// 可写的位平面
pub trait BitplanesMut: Bitplanes {
    /// 获取第 `index` 个位平面的可写视图
    fn plane_mut(&mut self, index: usize) -> &mut [u8];
}

impl<T: AsRef<[u8]>> Bitplanes for [T] {
    fn plane_count(&self) -> usize {
        self.len()
    }

    fn plane(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> BitplanesMut for [T] {
    fn plane_mut(&mut self, index: usize) -> &mut [u8] {
        self[index].as_mut()
    }
}

impl<T: AsRef<[u8]>> Bitplanes for Vec<T> {
    fn plane_count(&self) -> usize {
        self.len()
    }

    fn plane(&self, index: usize) -> &[u8] {
        self[index].as_ref()
    }
}

impl<T: AsRef<[u8]> + AsMut<[u8]>> BitplanesMut for Vec<T> {
    fn plane_mut(&mut self, index: usize) -> &mut [u8] {
        self[index].as_mut()
    }
}

/// 连续存放的位平面: `depth` 段等长的数据依次排列
#[derive(Debug, Clone, Copy)]
pub struct ContiguousBitplanes<'a> {
    data: &'a [u8],
    plane_size: usize,
    depth: usize,
}

impl<'a> ContiguousBitplanes<'a> {
    /// 按屏幕几何参数切分连续缓冲区
    pub fn new(data: &'a [u8], geometry: &ScreenGeometry) -> Result<Self> {
        geometry.validate()?;
        ensure_len(data.len(), geometry.bitplanes_size())?;

        Ok(Self {
            data,
            plane_size: geometry.bitplane_size(),
            depth: geometry.depth,
        })
    }
}

impl Bitplanes for ContiguousBitplanes<'_> {
    fn plane_count(&self) -> usize {
        self.depth
    }

    fn plane(&self, index: usize) -> &[u8] {
        let offset = index * self.plane_size;
        &self.data[offset..offset + self.plane_size]
    }
}

/// 连续存放的可写位平面
#[derive(Debug)]
pub struct ContiguousBitplanesMut<'a> {
    data: &'a mut [u8],
    plane_size: usize,
    depth: usize,
}

impl<'a> ContiguousBitplanesMut<'a> {
    /// 按屏幕几何参数切分连续缓冲区
    pub fn new(data: &'a mut [u8], geometry: &ScreenGeometry) -> Result<Self> {
        geometry.validate()?;
        ensure_len(data.len(), geometry.bitplanes_size())?;

        Ok(Self {
            data,
            plane_size: geometry.bitplane_size(),
            depth: geometry.depth,
        })
    }
}

impl Bitplanes for ContiguousBitplanesMut<'_> {
    fn plane_count(&self) -> usize {
        self.depth
    }

    fn plane(&self, index: usize) -> &[u8] {
        let offset = index * self.plane_size;
        &self.data[offset..offset + self.plane_size]
    }
}

impl BitplanesMut for ContiguousBitplanesMut<'_> {
    fn plane_mut(&mut self, index: usize) -> &mut [u8] {
        let offset = index * self.plane_size;
        &mut self.data[offset..offset + self.plane_size]
    }
}

fn ensure_plane_count<B: Bitplanes + ?Sized>(bitplanes: &B, depth: usize) -> Result<()> {
    if bitplanes.plane_count() < depth {
        tracing::error!(
            "位平面数量不足: 需要 {}, 实际 {}",
            depth,
            bitplanes.plane_count()
        );
        return Err(AmiVideoError::SizeMismatch {
            expected: depth,
            actual: bitplanes.plane_count(),
        });
    }
    Ok(())
}

/// 将各个位平面转换为 chunky 像素数组
///
/// 结果长度为 `pitch * height`, 每行 `width` 个有效像素之后的填充字节为 0。
/// 位平面每行按 16 位字对齐, 行尾多出的填充位会被跳过。
pub fn bitplane_memory_to_chunky<B: Bitplanes + ?Sized>(
    bitplanes: &B,
    geometry: &ScreenGeometry,
) -> Result<Vec<u8>> {
    geometry.validate()?;
    ensure_plane_count(bitplanes, geometry.depth)?;

    let plane_size = geometry.bitplane_size();
    for index in 0..geometry.depth {
        ensure_len(bitplanes.plane(index).len(), plane_size)?;
    }

    tracing::debug!(
        "位平面转 chunky: {}x{}, pitch={}, depth={}",
        geometry.width,
        geometry.height,
        geometry.pitch,
        geometry.depth
    );

    let scan_line_size = scan_line_size(geometry.width);
    let mut result = vec![0u8; geometry.chunky_size()];

    for index in 0..geometry.depth {
        let index_bit = 1u8 << index;
        let plane = &bitplanes.plane(index)[..plane_size];

        for (line, row) in plane
            .chunks_exact(scan_line_size)
            .zip(result.chunks_exact_mut(geometry.pitch))
        {
            for (x, pixel) in row[..geometry.width].iter_mut().enumerate() {
                if line[x / 8] & (0x80 >> (x % 8)) != 0 {
                    *pixel |= index_bit;
                }
            }
        }
    }

    Ok(result)
}

/// 将连续存放的位平面转换为 chunky 像素数组
pub fn bitplanes_to_chunky(bitplanes: &[u8], geometry: &ScreenGeometry) -> Result<Vec<u8>> {
    let planes = ContiguousBitplanes::new(bitplanes, geometry)?;
    bitplane_memory_to_chunky(&planes, geometry)
}

/// 将 chunky 像素写入已有的位平面
///
/// 像素按行优先顺序连续写入, 不做扫描线对齐: 第 `i` 个像素对应字节 `i / 8`
/// 的第 `7 - i % 8` 位。只修改被写入的位, 其他位保持不变。
/// 像素值中高于 `depth` 的位会被忽略。
pub fn chunky_to_bitplane_memory<B: BitplanesMut + ?Sized>(
    bitplanes: &mut B,
    pixels: &[u8],
    width: usize,
    height: usize,
    depth: usize,
) -> Result<()> {
    let geometry = ScreenGeometry::new(width, height, depth);
    geometry.validate()?;

    let pixel_count = width * height;
    ensure_len(pixels.len(), pixel_count)?;
    ensure_plane_count(bitplanes, depth)?;

    let packed_size = pixel_count.div_ceil(8);
    for index in 0..depth {
        ensure_len(bitplanes.plane(index).len(), packed_size)?;
    }

    tracing::debug!("chunky 转位平面: {}x{}, depth={}", width, height, depth);

    for index in 0..depth {
        let value_bit = 1u8 << index;
        let plane = bitplanes.plane_mut(index);

        for (i, &pixel) in pixels[..pixel_count].iter().enumerate() {
            let bitmask = 0x80u8 >> (i % 8);
            let byte = &mut plane[i / 8];

            if pixel & value_bit != 0 {
                *byte |= bitmask;
            } else {
                *byte &= !bitmask;
            }
        }
    }

    Ok(())
}

/// 将 chunky 像素转换为连续存放的位平面
///
/// 每个位平面分配 `scan_line_size(width) * height` 字节。
pub fn chunky_to_bitplanes(
    pixels: &[u8],
    width: usize,
    height: usize,
    depth: usize,
) -> Result<Vec<u8>> {
    let geometry = ScreenGeometry::new(width, height, depth);
    geometry.validate()?;

    let mut result = vec![0u8; geometry.bitplanes_size()];
    {
        let mut planes = ContiguousBitplanesMut::new(&mut result, &geometry)?;
        chunky_to_bitplane_memory(&mut planes, pixels, width, height, depth)?;
    }

    Ok(result)
}
