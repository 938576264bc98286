use crate::controllers::interactive::events::render::RenderEvent;

pub trait InteractiveControllerPresenterPort: Send + Sync {
    /// Called on the worker thread while the controller's request slot is
    /// locked. Must not call `submit_request` on the same controller.
    fn present(&self, event: RenderEvent);
}
