/// Braille frames cycled once per tick while a refresh is in flight.
///
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Return the frame for the given spinner index.
///
pub fn frame(index: usize) -> &'static str {
    FRAMES[index % FRAMES.len()]
}
