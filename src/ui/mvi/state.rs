/// Renderable state. `Default` is the state before anything happened;
/// `PartialEq` lets owners skip redraws when a transition changed nothing.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
