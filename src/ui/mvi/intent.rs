/// Something that happened: a key press on a screen, or a request being
/// issued, resolved or rejected.
pub trait Intent: Send + 'static {}
