//! Coherent 3D value noise
//!
//! Coordinates are 24.8 fixed-point: the upper bits select a lattice cell and
//! the low byte is the position inside it. Lattice values come from a
//! SplitMix-style hash and are blended with an eased trilinear interpolation,
//! so neighbouring samples vary smoothly along every axis.

use crate::math8::{blend8, ease_in_out_quad};

/// Size of one lattice cell in coordinate units
pub const CELL: u32 = 256;

/// Deterministic hash for lattice values
#[inline]
const fn hash(x: u64) -> u32 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    #[allow(clippy::cast_possible_truncation)]
    {
        (z ^ (z >> 31)) as u32
    }
}

/// Pseudo-random value (0-255) attached to a lattice point
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
const fn lattice(x: u32, y: u32, z: u32) -> u8 {
    let key = (x as u64).wrapping_mul(0x0000_0100_0000_01b3)
        ^ (y as u64).wrapping_mul(0x9e37_79b9)
        ^ (z as u64).wrapping_mul(0xc2b2_ae3d_27d4_eb4f);
    (hash(key) & 0xFF) as u8
}

/// Sample 3D value noise, returning 0-255
#[allow(clippy::cast_possible_truncation)]
pub fn noise3(x: u32, y: u32, z: u32) -> u8 {
    let (xi, yi, zi) = (x >> 8, y >> 8, z >> 8);
    let tx = ease_in_out_quad((x & 0xFF) as u8);
    let ty = ease_in_out_quad((y & 0xFF) as u8);
    let tz = ease_in_out_quad((z & 0xFF) as u8);

    let (x1, y1, z1) = (
        xi.wrapping_add(1),
        yi.wrapping_add(1),
        zi.wrapping_add(1),
    );

    let near = blend8(
        blend8(lattice(xi, yi, zi), lattice(x1, yi, zi), tx),
        blend8(lattice(xi, y1, zi), lattice(x1, y1, zi), tx),
        ty,
    );
    let far = blend8(
        blend8(lattice(xi, yi, z1), lattice(x1, yi, z1), tx),
        blend8(lattice(xi, y1, z1), lattice(x1, y1, z1), tx),
        ty,
    );

    blend8(near, far, tz)
}
