//! Window geometry and pointer-driven drag/resize, in terminal cells.
//!
//! Independent of the typewriter: the frame only moves in response to
//! pointer events and viewport changes.

/// Smallest size a user resize may produce.
pub const MIN_WIDTH: u16 = 30;
pub const MIN_HEIGHT: u16 = 8;

const INITIAL_POSITION: Position = Position { x: 4, y: 2 };
const MAX_INITIAL_WIDTH: u16 = 80;
const MAX_INITIAL_HEIGHT: u16 = 20;

/// Width of the bottom-right resize handle.
const RESIZE_HANDLE_WIDTH: u16 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    #[must_use]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Size of the terminal the window lives in.
pub type Viewport = Size;

/// Position and size of the terminal window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowFrame {
    pub position: Position,
    pub size: Size,
}

impl WindowFrame {
    /// Default frame for a viewport: 90% wide and 60% tall, capped.
    #[must_use]
    pub fn initial(viewport: Viewport) -> Self {
        let width = (u32::from(viewport.width) * 9 / 10) as u16;
        let height = (u32::from(viewport.height) * 6 / 10) as u16;
        let mut frame = Self {
            position: INITIAL_POSITION,
            size: Size::new(
                width.min(MAX_INITIAL_WIDTH),
                height.min(MAX_INITIAL_HEIGHT),
            ),
        };
        frame.clamp_to(viewport);
        frame
    }

    #[must_use]
    pub fn right(&self) -> u16 {
        self.position.x.saturating_add(self.size.width)
    }

    #[must_use]
    pub fn bottom(&self) -> u16 {
        self.position.y.saturating_add(self.size.height)
    }

    /// Keep the frame fully inside `viewport`, shrinking it if the viewport
    /// got smaller than the window.
    pub fn clamp_to(&mut self, viewport: Viewport) {
        self.size.width = self.size.width.min(viewport.width);
        self.size.height = self.size.height.min(viewport.height);
        self.position.x = self
            .position
            .x
            .min(viewport.width.saturating_sub(self.size.width));
        self.position.y = self
            .position
            .y
            .min(viewport.height.saturating_sub(self.size.height));
    }

    /// The top row is the title bar and doubles as the drag handle.
    #[must_use]
    pub fn title_bar_contains(&self, pointer: Position) -> bool {
        self.size.height > 0
            && pointer.y == self.position.y
            && (self.position.x..self.right()).contains(&pointer.x)
    }

    #[must_use]
    pub fn resize_handle_contains(&self, pointer: Position) -> bool {
        if self.size.width == 0 || self.size.height == 0 {
            return false;
        }
        let handle_x = self.right().saturating_sub(RESIZE_HANDLE_WIDTH);
        pointer.y == self.bottom() - 1 && (handle_x..self.right()).contains(&pointer.x)
    }
}

/// Active pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    /// Moving the window; `grab` is the pointer offset from the window origin.
    Dragging { grab_x: i32, grab_y: i32 },
    Resizing { origin: Position, start: Size },
}

/// Tracks a press-move-release sequence against a [`WindowFrame`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    gesture: Gesture,
}

impl PointerTracker {
    #[must_use]
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Start a gesture if `pointer` hits a handle. Returns whether one started.
    pub fn press(&mut self, pointer: Position, frame: &WindowFrame) -> bool {
        self.gesture = if frame.resize_handle_contains(pointer) {
            Gesture::Resizing {
                origin: pointer,
                start: frame.size,
            }
        } else if frame.title_bar_contains(pointer) {
            Gesture::Dragging {
                grab_x: i32::from(pointer.x) - i32::from(frame.position.x),
                grab_y: i32::from(pointer.y) - i32::from(frame.position.y),
            }
        } else {
            Gesture::Idle
        };
        self.is_active()
    }

    /// Apply pointer motion to `frame`. Returns whether the frame changed.
    pub fn motion(&self, pointer: Position, frame: &mut WindowFrame, viewport: Viewport) -> bool {
        let before = *frame;
        match self.gesture {
            Gesture::Idle => {}
            Gesture::Dragging { grab_x, grab_y } => {
                let x = i32::from(pointer.x) - grab_x;
                let y = i32::from(pointer.y) - grab_y;
                let max_x = i32::from(viewport.width) - i32::from(frame.size.width);
                let max_y = i32::from(viewport.height) - i32::from(frame.size.height);
                frame.position.x = to_cell(x.min(max_x).max(0));
                frame.position.y = to_cell(y.min(max_y).max(0));
            }
            Gesture::Resizing { origin, start } => {
                let dx = i32::from(pointer.x) - i32::from(origin.x);
                let dy = i32::from(pointer.y) - i32::from(origin.y);
                let room_x = i32::from(viewport.width) - i32::from(frame.position.x);
                let room_y = i32::from(viewport.height) - i32::from(frame.position.y);
                // Minimum size wins over the viewport bound.
                let width = (i32::from(start.width) + dx)
                    .min(room_x)
                    .max(i32::from(MIN_WIDTH));
                let height = (i32::from(start.height) + dy)
                    .min(room_y)
                    .max(i32::from(MIN_HEIGHT));
                frame.size = Size::new(to_cell(width), to_cell(height));
            }
        }
        *frame != before
    }

    pub fn release(&mut self) {
        self.gesture = Gesture::Idle;
    }
}

fn to_cell(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}
