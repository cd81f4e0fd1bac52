/// One event of the driver's line protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Absolute pen coordinates in device space, [0, 65536) per axis.
    Position { x: i32, y: i32, pressure: i32 },
    /// State change of one button channel; status is 0 (up) or 1 (down).
    Button { id: i32, status: i32 },
}
