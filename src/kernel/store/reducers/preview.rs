use crate::kernel::action::PreviewAction;
use crate::kernel::store::{DispatchResult, Store};

impl Store {
    pub(in crate::kernel::store) fn reduce_preview_action(
        &mut self,
        action: PreviewAction,
    ) -> DispatchResult {
        let preview = self.state.workspace.preview_mut();
        let changed = match action {
            PreviewAction::SetUrl(url) => preview.set_url(url),
            PreviewAction::SetDeviceFrame(frame) => preview.set_device_frame(frame),
            PreviewAction::ToggleFullscreen => preview.toggle_fullscreen(),
        };
        DispatchResult::changed(changed)
    }
}
