//! Scripted identity provider.

use async_trait::async_trait;
use std::sync::Mutex;
use veriseal_session::{IdentityError, IdentityProvider};
use veriseal_types::{CallerIdentity, NetworkDescriptor};

enum Behavior {
    Approve(CallerIdentity),
    Decline,
    Unreachable,
}

/// Identity provider that follows a script instead of asking a human.
pub struct NullIdentityProvider {
    behavior: Behavior,
    fail_network_switch: bool,
    switch_calls: Mutex<Vec<NetworkDescriptor>>,
}

impl NullIdentityProvider {
    /// Always approves with the given principal.
    pub fn approving(identity: CallerIdentity) -> Self {
        Self {
            behavior: Behavior::Approve(identity),
            fail_network_switch: false,
            switch_calls: Mutex::new(Vec::new()),
        }
    }

    /// Always declines.
    pub fn declining() -> Self {
        Self {
            behavior: Behavior::Decline,
            fail_network_switch: false,
            switch_calls: Mutex::new(Vec::new()),
        }
    }

    /// Always unreachable.
    pub fn unreachable() -> Self {
        Self {
            behavior: Behavior::Unreachable,
            fail_network_switch: false,
            switch_calls: Mutex::new(Vec::new()),
        }
    }

    /// Approve the identity but fail every network switch.
    pub fn with_failing_network_switch(mut self) -> Self {
        self.fail_network_switch = true;
        self
    }

    /// Networks this provider was asked to switch to.
    pub fn switch_calls(&self) -> Vec<NetworkDescriptor> {
        self.switch_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityProvider for NullIdentityProvider {
    async fn request_identity(&self) -> Result<CallerIdentity, IdentityError> {
        match &self.behavior {
            Behavior::Approve(identity) => Ok(identity.clone()),
            Behavior::Decline => Err(IdentityError::Declined),
            Behavior::Unreachable => {
                Err(IdentityError::Unreachable("provider offline".into()))
            }
        }
    }

    async fn switch_network(&self, network: &NetworkDescriptor) -> Result<(), IdentityError> {
        self.switch_calls.lock().unwrap().push(network.clone());
        if self.fail_network_switch {
            return Err(IdentityError::NetworkSwitch(
                network.name.clone(),
                "switch refused".into(),
            ));
        }
        Ok(())
    }
}
