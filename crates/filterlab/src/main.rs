use argh::FromArgs;
use std::{
    path::PathBuf,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use filterlab::{
    console,
    mode::{self, ModeRequest},
    viewer::DiskViewer,
    window::{self, WindowApp},
    ConsoleError, SessionError, ViewerError,
};

// time left to a session to wind down once its window is gone
const SESSION_GRACE: Duration = Duration::from_millis(500);

#[derive(FromArgs)]
/// Explore edge detectors, blurs and color tints on an image
struct Args {
    /// session to start: 'e' for edge detection, 'c' for color tints
    #[argh(option, short = 'm')]
    mode: Option<String>,

    /// path to an input image
    #[argh(option, short = 'i')]
    image_path: Option<PathBuf>,

    /// write every displayed frame as PNG into this directory instead of opening a window
    #[argh(option, short = 'o')]
    output_dir: Option<PathBuf>,
}

// end of input or a closed window behaves like choosing exit
fn finish(outcome: Result<(), SessionError>) -> Result<(), Box<dyn std::error::Error>> {
    match outcome {
        Err(SessionError::Console(ConsoleError::InputClosed)) => {
            log::info!("input closed, exiting");
            Ok(())
        }
        Err(SessionError::Viewer(ViewerError::WindowClosed)) => {
            log::info!("window closed, exiting");
            Ok(())
        }
        other => Ok(other?),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let request = ModeRequest {
        mode: args.mode,
        image_path: args.image_path,
    };

    if let Some(output_dir) = args.output_dir {
        let mut console = console::stdio();
        return finish(mode::run(&mut console, request, || {
            Ok(DiskViewer::new(output_dir))
        }));
    }

    // the window event loop must own the main thread, the session runs aside
    // and hands over the window once it has an image to show
    let (launch_tx, launch_rx) = mpsc::channel::<WindowApp>();
    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let mut console = console::stdio();
        let outcome = mode::run(&mut console, request, move || {
            let (viewer, app) = window::window_pair();
            launch_tx.send(app).map_err(|_| ViewerError::WindowClosed)?;
            Ok(viewer)
        });
        let _ = done_tx.send(outcome);
    });

    let outcome = match launch_rx.recv() {
        Ok(app) => {
            app.run("filterlab")?;
            done_rx.recv_timeout(SESSION_GRACE)
        }
        // the session ended without opening a window
        Err(_) => done_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
    };

    match outcome {
        Ok(outcome) => finish(outcome),
        // the session is still blocked on the terminal
        Err(RecvTimeoutError::Timeout) => {
            log::info!("window closed, exiting");
            Ok(())
        }
        Err(RecvTimeoutError::Disconnected) => Err("session thread panicked".into()),
    }
}
