use crate::kernel::action::UserAction;
use crate::kernel::store::{DispatchResult, Store};

impl Store {
    pub(in crate::kernel::store) fn reduce_user_action(
        &mut self,
        action: UserAction,
    ) -> DispatchResult {
        let user = &mut self.state.user;
        let changed = match action {
            UserAction::SetUser(next) => user.set_user(next),
            UserAction::Update(patch) => user.update_user(&patch),
            UserAction::UpdatePreferences(patch) => user.update_preferences(&patch),
            UserAction::DeductCredits(amount) => user.deduct_credits(amount),
            UserAction::Clear => user.clear(),
            UserAction::SetError(error) => user.set_error(error),
        };
        DispatchResult::changed(changed)
    }
}
