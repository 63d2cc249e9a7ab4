// Texture formats shared by the render passes. Kept free of web-only types
// so host tests can include this file directly.

/// Video frames are color: the sampler decodes sRGB to linear.
pub(crate) const VIDEO_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// The blob sprite is a coverage map, not color. Its stored values feed the
/// mask gain unchanged, so it must not be sRGB-decoded on sample.
pub(crate) const SPRITE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

/// Offscreen mask target the sprites accumulate into.
pub(crate) const MASK_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
