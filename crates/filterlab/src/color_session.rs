use std::{
    io::{BufRead, Write},
    path::Path,
};

use filterlab_imgproc::tint::{self, ColorFilter, TintParams, DEFAULT_GREEN_INTENSITY};
use filterlab_io::functional as F;
use image::RgbImage;

use crate::{
    console::Console,
    error::{SessionError, ViewerError},
    viewer::{Frame, Viewer},
};

/// Title of the window the filtered image is shown in.
pub const WINDOW_TITLE: &str = "Filtered Image";

/// Key leaving the session.
pub const QUIT_KEY: char = 'q';

/// Keys selecting a filter, with their menu labels.
pub const KEY_BINDINGS: [(char, ColorFilter, &str); 7] = [
    ('r', ColorFilter::RedTint, "Red Tint"),
    ('b', ColorFilter::BlueTint, "Blue Tint"),
    ('g', ColorFilter::GreenTint, "Green Tint"),
    ('i', ColorFilter::IncreaseRed, "Increase Red"),
    ('d', ColorFilter::DecreaseBlue, "Decrease Blue"),
    ('x', ColorFilter::IncreaseGreen, "Increase Green"),
    ('y', ColorFilter::DecreaseRed, "Decrease Red"),
];

/// What a key press asks the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// make the filter the active one.
    Select(ColorFilter),
    /// leave the session.
    Quit,
    /// the key is not bound.
    Invalid,
}

/// Map a key press to an action. Keys are case sensitive.
pub fn key_action(key: Option<char>) -> KeyAction {
    match key {
        Some(QUIT_KEY) => KeyAction::Quit,
        Some(key) => KEY_BINDINGS
            .iter()
            .find(|(bound, _, _)| *bound == key)
            .map_or(KeyAction::Invalid, |(_, filter, _)| KeyAction::Select(*filter)),
        None => KeyAction::Invalid,
    }
}

/// Run the color filter session on the image at `image_path`.
///
/// The viewer is only created once the image has been loaded, and all its
/// windows are released when the session ends, whatever the reason.
pub fn run<R, W, V, M>(
    console: &mut Console<R, W>,
    image_path: &Path,
    make_viewer: M,
) -> Result<(), SessionError>
where
    R: BufRead,
    W: Write,
    V: Viewer,
    M: FnOnce() -> Result<V, ViewerError>,
{
    let image = match F::read_image_rgb8(image_path) {
        Ok(image) => image,
        Err(err) => {
            log::warn!("failed to load {}: {err}", image_path.display());
            console.say("Error: Could not load image.")?;
            return Ok(());
        }
    };
    log::info!("color filter session on {}", image_path.display());

    let mut viewer = make_viewer()?;

    let outcome = interact(console, &mut viewer, &image);
    let closed = viewer.close_all();
    outcome?;
    closed?;
    Ok(())
}

fn interact<R: BufRead, W: Write, V: Viewer>(
    console: &mut Console<R, W>,
    viewer: &mut V,
    image: &RgbImage,
) -> Result<(), SessionError> {
    console.say("\nColor Filter Options:")?;
    for (key, _, label) in KEY_BINDINGS {
        console.say(format_args!("{key} - {label}"))?;
    }
    console.say(format_args!("{QUIT_KEY} - Quit"))?;

    let mut filter = ColorFilter::Original;
    loop {
        let params = read_params(console, filter)?;
        let filtered = tint::apply_color_filter(image, filter, params);
        viewer.show(WINDOW_TITLE, Frame::Rgb(&filtered))?;

        match key_action(read_key(console, viewer)?) {
            KeyAction::Select(next) => {
                log::debug!("filter {filter} -> {next}");
                filter = next;
            }
            KeyAction::Quit => {
                console.say("Exiting color filter...")?;
                return Ok(());
            }
            KeyAction::Invalid => console.say("Invalid key pressed.")?,
        }
    }
}

// keys come from the display window, or from the terminal when it has none
fn read_key<R: BufRead, W: Write, V: Viewer>(
    console: &mut Console<R, W>,
    viewer: &mut V,
) -> Result<Option<char>, SessionError> {
    match viewer.wait_key()? {
        Some(key) => Ok(Some(key)),
        None => Ok(console.read_key("Press a key: ")?),
    }
}

fn read_params<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    filter: ColorFilter,
) -> Result<TintParams, SessionError> {
    if filter != ColorFilter::IncreaseGreen {
        return Ok(TintParams::default());
    }

    let reply = console.prompt_line("Enter green intensity to increase: ")?;
    let green_intensity = match reply.trim().parse::<i32>() {
        Ok(intensity) => intensity,
        Err(_) => {
            console.say(format_args!(
                "Invalid input. Using default intensity of {DEFAULT_GREEN_INTENSITY}."
            ))?;
            DEFAULT_GREEN_INTENSITY
        }
    };
    Ok(TintParams { green_intensity })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_action() {
        assert_eq!(key_action(Some('r')), KeyAction::Select(ColorFilter::RedTint));
        assert_eq!(key_action(Some('b')), KeyAction::Select(ColorFilter::BlueTint));
        assert_eq!(key_action(Some('g')), KeyAction::Select(ColorFilter::GreenTint));
        assert_eq!(key_action(Some('i')), KeyAction::Select(ColorFilter::IncreaseRed));
        assert_eq!(key_action(Some('d')), KeyAction::Select(ColorFilter::DecreaseBlue));
        assert_eq!(key_action(Some('x')), KeyAction::Select(ColorFilter::IncreaseGreen));
        assert_eq!(key_action(Some('y')), KeyAction::Select(ColorFilter::DecreaseRed));
        assert_eq!(key_action(Some('q')), KeyAction::Quit);
        assert_eq!(key_action(Some('R')), KeyAction::Invalid);
        assert_eq!(key_action(Some('z')), KeyAction::Invalid);
        assert_eq!(key_action(None), KeyAction::Invalid);
    }

    #[test]
    fn test_every_filter_has_a_key() {
        for filter in ColorFilter::ALL {
            if filter == ColorFilter::Original {
                continue;
            }
            assert!(
                KEY_BINDINGS.iter().any(|(_, bound, _)| *bound == filter),
                "{filter} has no key"
            );
        }
    }
}
