//! Double-buffered frame compositor.
//!
//! A [`Screen`] keeps the frame currently on the display (`shown`) and the one
//! being assembled (`pending`). Images are overlaid onto `pending` with
//! [`Screen::draw`]; [`Screen::render`] diffs the two frames, sends only the
//! changed cells to the display and swaps:
//!
//! ```text
//!   draw(a), draw(b) ──> pending ──┐
//!                                  ├─ diff ──> Set / Clear commands ──> display
//!                        shown ────┘
//!   after render(): shown = pending, pending = empty
//! ```

use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::display::{DisplayDevice, DrawCommand};
use crate::error::{Error, Result};
use crate::render::Image;

/// Largest `(height, width)` within the given size whose width is about
/// `ratio` times its height.
///
/// Terminal cells are roughly twice as tall as wide, so a ratio near 2 keeps
/// rendered shapes in proportion. Non-positive ratios return the size as is.
pub fn fit_aspect(height: usize, width: usize, ratio: f64) -> (usize, usize) {
    if !(ratio > 0.0 && ratio.is_finite()) {
        return (height, width);
    }
    if width as f64 > height as f64 * ratio {
        (height, (height as f64 * ratio) as usize)
    } else {
        ((width as f64 / ratio) as usize, width)
    }
}

/// Frames shown on a [`DisplayDevice`], updated by diffing.
pub struct Screen<D: DisplayDevice> {
    display: D,
    shown: Image,
    pending: Image,
}

impl<D: DisplayDevice> Screen<D> {
    /// Creates a screen covering the whole display.
    pub fn new(display: D) -> Result<Self> {
        let (height, width) = display.size()?;
        Ok(Self::with_size(display, height, width))
    }

    /// Creates a screen of a fixed size, regardless of what the display reports.
    pub fn with_size(display: D, height: usize, width: usize) -> Self {
        Self {
            display,
            shown: Image::new(height, width),
            pending: Image::new(height, width),
        }
    }

    pub fn height(&self) -> usize {
        self.pending.height()
    }

    pub fn width(&self) -> usize {
        self.pending.width()
    }

    /// The frame last sent to the display.
    pub fn shown(&self) -> &Image {
        &self.shown
    }

    /// The frame being assembled for the next [`Screen::render`].
    pub fn pending(&self) -> &Image {
        &self.pending
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn into_display(self) -> D {
        self.display
    }

    /// Overlays `image` onto the pending frame. Later draws win.
    pub fn draw(&mut self, image: &Image) -> &mut Self {
        self.pending.overlay(image);
        self
    }

    /// Throws away everything drawn since the last render.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Commands that turn `shown` into `pending`, row by row.
    pub fn diff(shown: &Image, pending: &Image) -> Vec<DrawCommand> {
        let height = shown.height().min(pending.height());
        let width = shown.width().min(pending.width());
        let mut commands = Vec::new();

        for row in 0..height {
            let before = &shown.row(row)[..width];
            let after = &pending.row(row)[..width];
            for (col, (old, new)) in before.iter().zip(after).enumerate() {
                match (old, new) {
                    (_, Some(cell)) if old != new => {
                        commands.push(DrawCommand::Set {
                            row,
                            col,
                            cell: *cell,
                        });
                    }
                    (Some(_), None) => commands.push(DrawCommand::Clear { row, col }),
                    _ => {}
                }
            }
        }
        commands
    }

    /// Sends the pending frame to the display and starts a new one.
    ///
    /// Returns how many cells were updated. On error the frames are left
    /// unswapped, so the next render retries the whole difference.
    pub fn render(&mut self) -> Result<usize> {
        let commands = Self::diff(&self.shown, &self.pending);
        for command in &commands {
            command.apply(&mut self.display)?;
        }
        self.display.flush()?;

        log::trace!(
            "screen render: {} cell update(s) on {}x{}",
            commands.len(),
            self.height(),
            self.width()
        );

        let fresh = Image::new(self.pending.height(), self.pending.width());
        self.shown = mem::replace(&mut self.pending, fresh);
        Ok(commands.len())
    }
}

static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);

/// Proof that this process owns the display session.
///
/// At most one guard exists at a time. Dropping it ends the session.
#[derive(Debug)]
pub struct SessionGuard {
    _private: (),
}

impl SessionGuard {
    /// Starts a session, failing with [`Error::SessionActive`] if one is already running.
    pub fn acquire() -> Result<Self> {
        SESSION_ACTIVE
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| Error::SessionActive)?;
        log::debug!("display session started");
        Ok(Self { _private: () })
    }

    pub fn is_active() -> bool {
        SESSION_ACTIVE.load(Ordering::Acquire)
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        SESSION_ACTIVE.store(false, Ordering::Release);
        log::debug!("display session ended");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{Cell, Color};

    /// Remembers every call instead of drawing.
    #[derive(Default)]
    struct RecordingDisplay {
        height: usize,
        width: usize,
        commands: Vec<DrawCommand>,
        flushes: usize,
    }

    impl RecordingDisplay {
        fn new(height: usize, width: usize) -> Self {
            Self {
                height,
                width,
                ..Default::default()
            }
        }

        fn take(&mut self) -> Vec<DrawCommand> {
            mem::take(&mut self.commands)
        }
    }

    impl DisplayDevice for RecordingDisplay {
        fn size(&self) -> Result<(usize, usize)> {
            Ok((self.height, self.width))
        }

        fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
            self.commands.push(DrawCommand::Set { row, col, cell });
            Ok(())
        }

        fn clear_cell(&mut self, row: usize, col: usize) -> Result<()> {
            self.commands.push(DrawCommand::Clear { row, col });
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            self.flushes += 1;
            Ok(())
        }
    }

    fn cell(glyph: char) -> Cell {
        Cell::glyph(glyph, Color::Cyan)
    }

    fn single(row: usize, col: usize, c: Cell) -> Image {
        let mut image = Image::new(4, 6);
        image.set(row, col, c);
        image
    }

    #[test]
    fn screen_takes_the_display_size() {
        let screen = Screen::new(RecordingDisplay::new(4, 6)).unwrap();
        assert_eq!((screen.height(), screen.width()), (4, 6));
    }

    #[test]
    fn one_visible_pixel_gives_one_set_then_nothing() {
        let mut screen = Screen::new(RecordingDisplay::new(4, 6)).unwrap();
        let frame = single(1, 2, cell('x'));

        screen.draw(&frame);
        assert_eq!(screen.render().unwrap(), 1);
        assert_eq!(
            screen.display_mut().take(),
            vec![DrawCommand::Set {
                row: 1,
                col: 2,
                cell: cell('x')
            }]
        );

        screen.draw(&frame);
        assert_eq!(screen.render().unwrap(), 0);
        assert!(screen.display_mut().take().is_empty());
        assert_eq!(screen.display().flushes, 2);
    }

    #[test]
    fn vanished_pixels_are_cleared() {
        let mut screen = Screen::new(RecordingDisplay::new(4, 6)).unwrap();
        screen.draw(&single(3, 5, cell('a')));
        screen.render().unwrap();
        screen.display_mut().take();

        assert_eq!(screen.render().unwrap(), 1);
        assert_eq!(
            screen.display_mut().take(),
            vec![DrawCommand::Clear { row: 3, col: 5 }]
        );
        assert_eq!(screen.shown().visible_count(), 0);
    }

    #[test]
    fn changed_cells_are_set_again() {
        let mut screen = Screen::new(RecordingDisplay::new(4, 6)).unwrap();
        screen.draw(&single(0, 0, cell('a')));
        screen.render().unwrap();
        screen.display_mut().take();

        screen.draw(&single(0, 0, cell('b')));
        screen.render().unwrap();
        assert_eq!(
            screen.display_mut().take(),
            vec![DrawCommand::Set {
                row: 0,
                col: 0,
                cell: cell('b')
            }]
        );
    }

    #[test]
    fn later_draws_win_and_clear_discards() {
        let mut screen = Screen::with_size(RecordingDisplay::new(0, 0), 4, 6);
        screen.draw(&single(2, 2, cell('a'))).draw(&single(2, 2, cell('b')));
        assert_eq!(screen.pending().get(2, 2), Some(cell('b')));

        screen.clear();
        assert_eq!(screen.render().unwrap(), 0);
    }

    #[test]
    fn into_display_hands_back_the_device() {
        let mut screen = Screen::new(RecordingDisplay::new(4, 6)).unwrap();
        screen.draw(&single(2, 3, cell('k')));
        screen.render().unwrap();

        let display = screen.into_display();
        assert_eq!(display.flushes, 1);
        assert_eq!(
            display.commands,
            vec![DrawCommand::Set {
                row: 2,
                col: 3,
                cell: cell('k')
            }]
        );
    }

    #[test]
    fn render_swaps_frames() {
        let mut screen = Screen::new(RecordingDisplay::new(4, 6)).unwrap();
        screen.draw(&single(1, 1, cell('z')));
        screen.render().unwrap();
        assert_eq!(screen.shown().get(1, 1), Some(cell('z')));
        assert_eq!(screen.pending().visible_count(), 0);
    }

    #[test]
    fn diff_walks_the_common_extent() {
        let mut shown = Image::new(2, 2);
        shown.set(0, 0, cell('a'));
        let mut pending = Image::new(3, 3);
        pending.set(0, 1, cell('b'));
        pending.set(2, 2, cell('c'));

        let commands = Screen::<RecordingDisplay>::diff(&shown, &pending);
        assert_eq!(
            commands,
            vec![
                DrawCommand::Clear { row: 0, col: 0 },
                DrawCommand::Set {
                    row: 0,
                    col: 1,
                    cell: cell('b')
                },
            ]
        );
    }

    #[test]
    fn fit_aspect_keeps_the_ratio_inside_the_device() {
        assert_eq!(fit_aspect(40, 200, 2.0), (40, 80));
        assert_eq!(fit_aspect(40, 60, 2.0), (30, 60));
        assert_eq!(fit_aspect(10, 25, 2.5), (10, 25));
        assert_eq!(fit_aspect(10, 20, 0.0), (10, 20));
    }

    #[test]
    fn only_one_session_at_a_time() {
        let first = SessionGuard::acquire().unwrap();
        assert!(SessionGuard::is_active());
        assert!(matches!(SessionGuard::acquire(), Err(Error::SessionActive)));
        drop(first);

        let again = SessionGuard::acquire().unwrap();
        drop(again);
        assert!(!SessionGuard::is_active());
    }
}
