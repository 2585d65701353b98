//! In-memory bridge used by unit tests.
//!
//! Models the one piece of derived daemon state the prober relies on: the
//! media plugin's track properties follow whichever `player` is selected.

#![allow(clippy::unwrap_used)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;

use super::{Bridge, BusValue, Endpoint, KdeConnectError, RemoteFailure, plugins};

/// A bridge call as observed by the fake
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Get {
        path: String,
        name: String,
    },
    Set {
        path: String,
        name: String,
        value: BusValue,
    },
    Invoke {
        path: String,
        interface: String,
        method: String,
        args: Vec<BusValue>,
    },
}

#[derive(Default)]
struct PlayerProfile {
    properties: HashMap<String, BusValue>,
    broken: bool,
}

#[derive(Default)]
struct State {
    properties: HashMap<(String, String), BusValue>,
    failures: HashMap<(String, String), RemoteFailure>,
    rejected_sets: HashSet<(String, String, BusValue)>,
    string_replies: HashMap<(String, String), Vec<String>>,
    players: HashMap<(String, String), PlayerProfile>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeBridge {
    state: Mutex<State>,
}

fn key(endpoint: &Endpoint, member: &str) -> (String, String) {
    (endpoint.path().to_string(), member.to_string())
}

fn failure(path: &str, member: &str, kind: RemoteFailure) -> KdeConnectError {
    KdeConnectError::RemoteCall {
        path: path.to_string(),
        member: member.to_string(),
        kind,
        details: format!("fake {kind}"),
    }
}

impl FakeBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_property(self, endpoint: &Endpoint, name: &str, value: impl Into<BusValue>) -> Self {
        self.state
            .lock()
            .unwrap()
            .properties
            .insert(key(endpoint, name), value.into());
        self
    }

    pub fn with_int(self, endpoint: &Endpoint, name: &str, value: i64) -> Self {
        self.with_property(endpoint, name, BusValue::Int(value))
    }

    pub fn with_failure(self, endpoint: &Endpoint, member: &str, kind: RemoteFailure) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(key(endpoint, member), kind);
        self
    }

    /// Rejects writes of exactly this value to the property
    pub fn with_rejected_set(self, endpoint: &Endpoint, name: &str, value: impl Into<BusValue>) -> Self {
        self.state.lock().unwrap().rejected_sets.insert((
            endpoint.path().to_string(),
            name.to_string(),
            value.into(),
        ));
        self
    }

    pub fn with_strings_reply(self, endpoint: &Endpoint, method: &str, reply: &[&str]) -> Self {
        self.state.lock().unwrap().string_replies.insert(
            key(endpoint, method),
            reply.iter().map(|item| item.to_string()).collect(),
        );
        self
    }

    /// Registers a media player on the device and appends it to `playerList`.
    pub fn with_player(
        self,
        device_id: &str,
        player: &str,
        is_playing: bool,
        title: &str,
        artist: &str,
    ) -> Self {
        let endpoint = Endpoint::resolve(device_id, Some(plugins::MPRIS_REMOTE));
        {
            let mut state = self.state.lock().unwrap();
            let list = state
                .properties
                .entry(key(&endpoint, "playerList"))
                .or_insert_with(|| BusValue::StrList(Vec::new()));
            if let BusValue::StrList(players) = list {
                players.push(player.to_string());
            }

            let profile = state
                .players
                .entry((endpoint.path().to_string(), player.to_string()))
                .or_default();
            profile
                .properties
                .insert("isPlaying".to_string(), BusValue::Bool(is_playing));
            profile
                .properties
                .insert("title".to_string(), BusValue::from(title));
            profile
                .properties
                .insert("artist".to_string(), BusValue::from(artist));
        }
        self
    }

    /// Registers a player whose track properties cannot be read once selected.
    pub fn with_broken_player(self, device_id: &str, player: &str) -> Self {
        let this = self.with_player(device_id, player, false, "", "");
        let endpoint = Endpoint::resolve(device_id, Some(plugins::MPRIS_REMOTE));
        this.state
            .lock()
            .unwrap()
            .players
            .get_mut(&(endpoint.path().to_string(), player.to_string()))
            .unwrap()
            .broken = true;
        this
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn sets(&self) -> Vec<(String, BusValue)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Set { name, value, .. } => Some((name, value)),
                _ => None,
            })
            .collect()
    }

    pub fn invocations(&self) -> Vec<(String, String, Vec<BusValue>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Invoke {
                    interface,
                    method,
                    args,
                    ..
                } => Some((interface, method, args)),
                _ => None,
            })
            .collect()
    }

    pub fn property(&self, endpoint: &Endpoint, name: &str) -> Option<BusValue> {
        self.state
            .lock()
            .unwrap()
            .properties
            .get(&key(endpoint, name))
            .cloned()
    }
}

impl State {
    fn selected_profile(&self, path: &str) -> Option<&PlayerProfile> {
        let selected = match self.properties.get(&(path.to_string(), "player".to_string())) {
            Some(BusValue::Str(player)) => player.clone(),
            _ => return None,
        };
        self.players.get(&(path.to_string(), selected))
    }

    fn object_exists(&self, path: &str) -> bool {
        self.properties.keys().any(|(known, _)| known == path)
            || self.string_replies.keys().any(|(known, _)| known == path)
    }
}

#[async_trait]
impl Bridge for FakeBridge {
    async fn get_property(
        &self,
        endpoint: &Endpoint,
        name: &str,
    ) -> Result<BusValue, KdeConnectError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Get {
            path: endpoint.path().to_string(),
            name: name.to_string(),
        });

        if let Some(kind) = state.failures.get(&key(endpoint, name)) {
            return Err(failure(endpoint.path(), name, *kind));
        }

        if endpoint.path().ends_with(plugins::MPRIS_REMOTE) {
            if let Some(profile) = state.selected_profile(endpoint.path()) {
                if profile.broken && name != "player" && name != "playerList" {
                    return Err(failure(endpoint.path(), name, RemoteFailure::Other));
                }
                if let Some(value) = profile.properties.get(name) {
                    return Ok(value.clone());
                }
            }
        }

        if let Some(value) = state.properties.get(&key(endpoint, name)) {
            return Ok(value.clone());
        }

        let kind = if state.object_exists(endpoint.path()) {
            RemoteFailure::PropertyNotFound
        } else {
            RemoteFailure::ObjectNotFound
        };
        Err(failure(endpoint.path(), name, kind))
    }

    async fn set_property(
        &self,
        endpoint: &Endpoint,
        name: &str,
        value: BusValue,
    ) -> Result<(), KdeConnectError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Set {
            path: endpoint.path().to_string(),
            name: name.to_string(),
            value: value.clone(),
        });

        if let Some(kind) = state.failures.get(&key(endpoint, name)) {
            return Err(failure(endpoint.path(), name, *kind));
        }
        if state.rejected_sets.contains(&(
            endpoint.path().to_string(),
            name.to_string(),
            value.clone(),
        )) {
            return Err(failure(endpoint.path(), name, RemoteFailure::Other));
        }

        state.properties.insert(key(endpoint, name), value);
        Ok(())
    }

    async fn invoke(
        &self,
        endpoint: &Endpoint,
        method: &str,
        args: &[BusValue],
    ) -> Result<(), KdeConnectError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Invoke {
            path: endpoint.path().to_string(),
            interface: endpoint.interface().to_string(),
            method: method.to_string(),
            args: args.to_vec(),
        });

        match state.failures.get(&key(endpoint, method)) {
            Some(kind) => Err(failure(endpoint.path(), method, *kind)),
            None => Ok(()),
        }
    }

    async fn invoke_for_strings(
        &self,
        endpoint: &Endpoint,
        method: &str,
        args: &[BusValue],
    ) -> Result<Vec<String>, KdeConnectError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Invoke {
            path: endpoint.path().to_string(),
            interface: endpoint.interface().to_string(),
            method: method.to_string(),
            args: args.to_vec(),
        });

        if let Some(kind) = state.failures.get(&key(endpoint, method)) {
            return Err(failure(endpoint.path(), method, *kind));
        }

        state
            .string_replies
            .get(&key(endpoint, method))
            .cloned()
            .ok_or_else(|| failure(endpoint.path(), method, RemoteFailure::MethodNotFound))
    }
}
