use std::fmt;

use image::{Rgb, RgbImage};

/// Default amount added to the green channel by [`ColorFilter::IncreaseGreen`].
pub const DEFAULT_GREEN_INTENSITY: i32 = 50;

/// Fixed amount used by the increase/decrease filters.
const SHIFT: i32 = 50;

/// A color channel, addressed by name.
///
/// Channels are named in blue, green, red order; [`Channel::index`] maps the
/// name to its position in an RGB pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// blue channel.
    Blue,
    /// green channel.
    Green,
    /// red channel.
    Red,
}

impl Channel {
    /// Position of the channel inside an [`Rgb`] pixel.
    pub const fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// The color filter currently applied to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorFilter {
    /// the unmodified image.
    #[default]
    Original,
    /// keep only the red channel.
    RedTint,
    /// keep only the blue channel.
    BlueTint,
    /// keep only the green channel.
    GreenTint,
    /// add 50 to the red channel.
    IncreaseRed,
    /// subtract 50 from the blue channel.
    DecreaseBlue,
    /// add a user chosen intensity to the green channel.
    IncreaseGreen,
    /// subtract 50 from the red channel.
    DecreaseRed,
}

impl ColorFilter {
    /// All the filters, in menu order.
    pub const ALL: [ColorFilter; 8] = [
        ColorFilter::Original,
        ColorFilter::RedTint,
        ColorFilter::BlueTint,
        ColorFilter::GreenTint,
        ColorFilter::IncreaseRed,
        ColorFilter::DecreaseBlue,
        ColorFilter::IncreaseGreen,
        ColorFilter::DecreaseRed,
    ];

    /// The snake_case name of the filter.
    pub const fn name(self) -> &'static str {
        match self {
            ColorFilter::Original => "original",
            ColorFilter::RedTint => "red_tint",
            ColorFilter::BlueTint => "blue_tint",
            ColorFilter::GreenTint => "green_tint",
            ColorFilter::IncreaseRed => "increase_red",
            ColorFilter::DecreaseBlue => "decrease_blue",
            ColorFilter::IncreaseGreen => "increase_green",
            ColorFilter::DecreaseRed => "decrease_red",
        }
    }

    /// Look a filter up by name. Unknown names select [`ColorFilter::Original`].
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|filter| filter.name() == name)
            .unwrap_or_default()
    }

    fn channel_ops(self, params: TintParams) -> Vec<ChannelOp> {
        use Channel::*;
        match self {
            ColorFilter::Original => vec![],
            ColorFilter::RedTint => vec![ChannelOp::Zero(Blue), ChannelOp::Zero(Green)],
            ColorFilter::BlueTint => vec![ChannelOp::Zero(Green), ChannelOp::Zero(Red)],
            ColorFilter::GreenTint => vec![ChannelOp::Zero(Blue), ChannelOp::Zero(Red)],
            ColorFilter::IncreaseRed => vec![ChannelOp::Shift(Red, SHIFT)],
            ColorFilter::DecreaseBlue => vec![ChannelOp::Shift(Blue, -SHIFT)],
            ColorFilter::IncreaseGreen => vec![ChannelOp::Shift(Green, params.green_intensity)],
            ColorFilter::DecreaseRed => vec![ChannelOp::Shift(Red, -SHIFT)],
        }
    }
}

impl fmt::Display for ColorFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Extra parameters some filters need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TintParams {
    /// amount added to the green channel by [`ColorFilter::IncreaseGreen`].
    pub green_intensity: i32,
}

impl Default for TintParams {
    fn default() -> Self {
        Self {
            green_intensity: DEFAULT_GREEN_INTENSITY,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ChannelOp {
    Zero(Channel),
    Shift(Channel, i32),
}

impl ChannelOp {
    fn apply(self, pixel: &mut Rgb<u8>) {
        match self {
            ChannelOp::Zero(channel) => pixel[channel.index()] = 0,
            ChannelOp::Shift(channel, delta) => {
                let value = &mut pixel[channel.index()];
                *value = saturating_shift(*value, delta);
            }
        }
    }
}

/// Add `delta` to a channel value, clamping the result to `[0, 255]`.
pub fn saturating_shift(value: u8, delta: i32) -> u8 {
    i32::from(value).saturating_add(delta).clamp(0, 255) as u8
}

/// Apply a color filter to an image.
///
/// The source image is never modified, the filter is applied to a copy.
///
/// # Arguments
///
/// * `src` - The source RGB image.
/// * `filter` - The filter to apply.
/// * `params` - Parameters for the filters that take one.
///
/// # Returns
///
/// The filtered copy of `src`.
pub fn apply_color_filter(src: &RgbImage, filter: ColorFilter, params: TintParams) -> RgbImage {
    let ops = filter.channel_ops(params);
    let mut dst = src.clone();
    if ops.is_empty() {
        return dst;
    }
    dst.pixels_mut().for_each(|pixel| {
        for op in &ops {
            op.apply(pixel);
        }
    });
    dst
}
