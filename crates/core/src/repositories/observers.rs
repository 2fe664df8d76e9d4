use super::LatestReceiver;
use crate::reading::VitalSignEntry;
use crate::{VitalsError, VitalsResult};
use fitnest_types::UserId;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

/// Per-user watch channels carrying the latest reading.
#[derive(Debug, Default)]
pub(crate) struct ObserverRegistry {
    senders: Mutex<HashMap<UserId, watch::Sender<Option<VitalSignEntry>>>>,
}

impl ObserverRegistry {
    /// Hands out a receiver seeded with `current`.
    pub(crate) fn subscribe(
        &self,
        user: &UserId,
        current: Option<VitalSignEntry>,
    ) -> VitalsResult<LatestReceiver> {
        let mut senders = self.senders.lock().map_err(|_| VitalsError::LockPoisoned)?;

        match senders.get(user) {
            Some(sender) => {
                sender.send_if_modified(|value| {
                    if *value == current {
                        return false;
                    }
                    *value = current;
                    true
                });
                Ok(sender.subscribe())
            }
            None => {
                let (sender, receiver) = watch::channel(current);
                senders.insert(user.clone(), sender);
                Ok(receiver)
            }
        }
    }

    /// Pushes the user's latest reading to their observers.
    ///
    /// `latest` is only evaluated when someone is listening. Callers must hold their store's
    /// write lock so concurrent publishes cannot land out of order.
    pub(crate) fn publish<F>(&self, user: &UserId, latest: F) -> VitalsResult<()>
    where
        F: FnOnce() -> VitalsResult<Option<VitalSignEntry>>,
    {
        let mut senders = self.senders.lock().map_err(|_| VitalsError::LockPoisoned)?;

        match senders.get(user).map(|sender| sender.receiver_count()) {
            None => return Ok(()),
            Some(0) => {
                // Everyone stopped listening.
                senders.remove(user);
                return Ok(());
            }
            Some(_) => {}
        }

        let latest = latest()?;
        if let Some(sender) = senders.get(user) {
            sender.send_replace(latest);
            tracing::debug!(user = %user, observers = sender.receiver_count(), "published latest vitals");
        }
        Ok(())
    }

}
