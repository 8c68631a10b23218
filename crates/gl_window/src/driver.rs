//! Multi-window driving loop
//!
//! Polls events once per iteration, renders every open window and drops the
//! ones that report [`Window::should_close`]. Dropping a window destroys it,
//! so the subsystem terminates once the last one is gone.

use crate::backend::NativeBackend;
use crate::error::WindowResult;
use crate::subsystem::SharedSubsystem;
use crate::window::Window;

/// Run one iteration over `windows`
///
/// Closed windows are removed in place; the first render error is returned
/// and leaves the remaining windows untouched.
pub fn frame<B: NativeBackend>(subsystem: &SharedSubsystem<B>, windows: &mut Vec<Window<B>>) -> WindowResult<()> {
    subsystem.borrow_mut().poll_events();

    let mut index = 0;
    while index < windows.len() {
        if windows[index].should_close() {
            let closed = windows.remove(index);
            log::info!("Window '{}' closed", closed.title());
        } else {
            windows[index].render()?;
            index += 1;
        }
    }
    Ok(())
}

/// Drive `windows` until every one of them has closed
pub fn run<B: NativeBackend>(subsystem: &SharedSubsystem<B>, windows: &mut Vec<Window<B>>) -> WindowResult<()> {
    log::info!("Starting main loop with {} window(s)", windows.len());
    while !windows.is_empty() {
        frame(subsystem, windows)?;
    }
    log::info!("All windows closed");
    Ok(())
}
