use std::{
    sync::mpsc::{self, Receiver, Sender, TryRecvError},
    time::Duration,
};

use eframe::egui::{self, TextureOptions};

use crate::{
    error::ViewerError,
    viewer::{Frame, Viewer},
};

// how often the window polls for new frames while idle
const POLL_INTERVAL: Duration = Duration::from_millis(30);

/// A request from a session to the window thread.
pub enum WindowCommand {
    /// display `image` in the window named `title`.
    Show {
        /// the window title.
        title: String,
        /// the pixels to display.
        image: egui::ColorImage,
    },
    /// release every window and quit the event loop.
    CloseAll,
}

/// The session side of the display window.
///
/// Frames are sent to a [`WindowApp`] running the event loop, which sends
/// back the keys typed while it has focus.
pub struct WindowViewer {
    commands: Sender<WindowCommand>,
    keys: Receiver<char>,
}

/// The event loop side of the display window, run with [`WindowApp::run`].
pub struct WindowApp {
    commands: Receiver<WindowCommand>,
    keys: Sender<char>,
    windows: Vec<(String, egui::TextureHandle)>,
}

/// Create a connected viewer and window application.
pub fn window_pair() -> (WindowViewer, WindowApp) {
    let (command_tx, command_rx) = mpsc::channel();
    let (key_tx, key_rx) = mpsc::channel();
    let viewer = WindowViewer {
        commands: command_tx,
        keys: key_rx,
    };
    let app = WindowApp {
        commands: command_rx,
        keys: key_tx,
        windows: Vec::new(),
    };
    (viewer, app)
}

fn color_image(frame: Frame<'_>) -> egui::ColorImage {
    let (width, height) = frame.dimensions();
    let size = [width as usize, height as usize];
    match frame {
        Frame::Gray(image) => egui::ColorImage::from_gray(size, image.as_raw().as_slice()),
        Frame::Rgb(image) => egui::ColorImage::from_rgb(size, image.as_raw().as_slice()),
    }
}

impl Viewer for WindowViewer {
    fn show(&mut self, title: &str, frame: Frame<'_>) -> Result<(), ViewerError> {
        self.commands
            .send(WindowCommand::Show {
                title: title.to_string(),
                image: color_image(frame),
            })
            .map_err(|_| ViewerError::WindowClosed)
    }

    fn wait_key(&mut self) -> Result<Option<char>, ViewerError> {
        let key = self.keys.recv().map_err(|_| ViewerError::WindowClosed)?;
        log::debug!("key {key:?} pressed");
        Ok(Some(key))
    }

    fn close_all(&mut self) -> Result<(), ViewerError> {
        // the window may already be gone, which is what was asked for
        let _ = self.commands.send(WindowCommand::CloseAll);
        Ok(())
    }
}

impl WindowApp {
    /// Run the event loop on the current thread until the session closes
    /// the windows or the user closes the main window.
    pub fn run(self, app_name: &str) -> eframe::Result<()> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 480.0]),
            ..Default::default()
        };
        eframe::run_native(app_name, options, Box::new(|_cc| Ok(Box::new(self))))
    }

    /// Apply the pending commands. Returns `false` once the windows must close.
    fn apply_commands(&mut self, ctx: &egui::Context) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(WindowCommand::Show { title, image }) => self.show(ctx, title, image),
                Ok(WindowCommand::CloseAll) | Err(TryRecvError::Disconnected) => return false,
                Err(TryRecvError::Empty) => return true,
            }
        }
    }

    fn show(&mut self, ctx: &egui::Context, title: String, image: egui::ColorImage) {
        match self.windows.iter_mut().find(|(shown, _)| *shown == title) {
            Some((_, texture)) => texture.set(image, TextureOptions::default()),
            None => {
                let texture = ctx.load_texture(&title, image, TextureOptions::default());
                self.windows.push((title, texture));
            }
        }
    }

    fn forward_keys(&self, ctx: &egui::Context) {
        let typed: Vec<char> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Text(text) => Some(text.chars()),
                    _ => None,
                })
                .flatten()
                .collect()
        });
        for key in typed {
            // nobody listening means the session is over, CloseAll follows
            let _ = self.keys.send(key);
        }
    }
}

impl eframe::App for WindowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.apply_commands(ctx) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }
        self.forward_keys(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label("Type keys here while a session waits for one.");
        });
        for (title, texture) in &self.windows {
            egui::Window::new(title.as_str()).show(ctx, |ui| {
                ui.image(texture);
            });
        }

        ctx.request_repaint_after(POLL_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    #[test]
    fn test_color_image() {
        let gray = GrayImage::from_pixel(3, 2, Luma([7]));
        let image = color_image(Frame::Gray(&gray));
        assert_eq!(image.size, [3, 2]);
        assert_eq!(image.pixels[0], egui::Color32::from_gray(7));

        let rgb = RgbImage::from_pixel(2, 4, Rgb([1, 2, 3]));
        let image = color_image(Frame::Rgb(&rgb));
        assert_eq!(image.size, [2, 4]);
        assert_eq!(image.pixels[5], egui::Color32::from_rgb(1, 2, 3));
    }

    #[test]
    fn test_window_viewer_commands() -> Result<(), ViewerError> {
        let (mut viewer, app) = window_pair();
        let rgb = RgbImage::from_pixel(2, 2, Rgb([9, 9, 9]));
        viewer.show("Filtered Image", Frame::Rgb(&rgb))?;
        viewer.close_all()?;

        match app.commands.try_recv() {
            Ok(WindowCommand::Show { title, image }) => {
                assert_eq!(title, "Filtered Image");
                assert_eq!(image.size, [2, 2]);
            }
            _ => panic!("expected a show command"),
        }
        assert!(matches!(
            app.commands.try_recv(),
            Ok(WindowCommand::CloseAll)
        ));
        Ok(())
    }

    #[test]
    fn test_window_viewer_keys() -> Result<(), ViewerError> {
        let (mut viewer, app) = window_pair();
        for key in ['r', 'q'] {
            app.keys.send(key).expect("viewer is listening");
        }
        assert_eq!(viewer.wait_key()?, Some('r'));
        assert_eq!(viewer.wait_key()?, Some('q'));

        drop(app);
        assert!(matches!(viewer.wait_key(), Err(ViewerError::WindowClosed)));
        let gray = GrayImage::new(1, 1);
        assert!(matches!(
            viewer.show("Original Image", Frame::Gray(&gray)),
            Err(ViewerError::WindowClosed)
        ));
        assert!(viewer.close_all().is_ok());
        Ok(())
    }
}
