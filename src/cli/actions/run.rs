use super::{inspect, issue, revoke, Action};
use anyhow::Result;

pub(super) fn execute(action: Action) -> Result<String> {
    match action {
        Action::Issue(args) => issue::handle(args),
        Action::Revoke(args) => revoke::handle(args),
        Action::Inspect(args) => inspect::handle(args),
    }
}
