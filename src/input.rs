/// Key-state snapshot handed to the simulation once per tick.
///
/// The host decides how keys map onto these flags; the core only asks
/// "is it held right now".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl InputState {
    pub const IDLE: InputState = InputState {
        left: false,
        right: false,
        fire: false,
    };

    /// Net horizontal direction: -1, 0 or +1.  Holding both cancels out.
    pub fn direction(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
