//! Self-destruct countdown
//!
//! Fires after too many wrong bio-scan codes. It cannot be interrupted: the
//! alerts play in order and the session ends `Destroyed`.

use std::sync::{Arc, Weak};

use super::with_live;
use crate::clock::Clock;
use crate::models::{LineKind, Markup};
use crate::script::SELF_DESTRUCT;
use crate::session::Shared;

/// Play the countdown against the session
pub(crate) async fn run(session: Weak<Shared>, clock: Arc<dyn Clock>) {
    warn!("Self-destruct sequence initiated");

    for (message, pause) in SELF_DESTRUCT {
        if with_live(&session, |shared| shared.append(LineKind::Error, Markup::text(message)))
            .is_none()
        {
            debug!("Session dropped during self-destruct");
            return;
        }
        clock.sleep(pause).await;
    }

    with_live(&session, Shared::finish_self_destruct);
}
