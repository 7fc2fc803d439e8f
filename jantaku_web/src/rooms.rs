//! Room registry: one `HostSession` per room code, fanned out to guests over a
//! `tokio::sync::broadcast` channel of snapshot JSON.

use jantaku_core::{
    GameConfig, GameError, GameEvent, HostSession, Phase, Snapshot, SnapshotChannel,
};
use rand::Rng;
use serde::Serialize;
use std::{collections::HashMap, fmt};
use tokio::sync::{broadcast, Mutex};

pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
pub const CODE_LEN: usize = 6;

pub fn generate_room_code(rng: &mut impl Rng) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

fn generate_token(rng: &mut impl Rng) -> String {
    format!("{:032x}", rng.gen::<u128>())
}

/// Publishes snapshots as JSON text; a room with no listeners drops them.
#[derive(Debug, Clone)]
pub struct BroadcastChannel {
    tx: broadcast::Sender<String>,
}

impl SnapshotChannel for BroadcastChannel {
    fn broadcast(&self, snapshot: &Snapshot) {
        match snapshot.to_json() {
            Ok(json) => {
                let _ = self.tx.send(json);
            }
            Err(e) => tracing::error!(error = %e, "snapshot not encodable"),
        }
    }
}

#[derive(Debug)]
struct Room {
    host_token: String,
    host_name: String,
    guests: Vec<String>,
    session: HostSession<BroadcastChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    NotFound(String),
    Forbidden,
    Game(GameError),
}

impl fmt::Display for RoomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomError::NotFound(code) => write!(f, "no room with code {}", code),
            RoomError::Forbidden => write!(f, "only the host may do that"),
            RoomError::Game(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RoomError {}

impl From<GameError> for RoomError {
    fn from(e: GameError) -> Self {
        RoomError::Game(e)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatedRoom {
    pub code: String,
    pub host_token: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Lobby {
    pub code: String,
    pub host: String,
    pub guests: Vec<String>,
    pub snapshot: Snapshot,
}

#[derive(Debug)]
pub struct Rooms {
    rooms: Mutex<HashMap<String, Room>>,
    capacity: usize,
}

impl Rooms {
    pub fn new(capacity: usize) -> Self {
        Rooms {
            rooms: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    pub async fn create(&self, host_name: String, config: GameConfig) -> CreatedRoom {
        let mut rooms = self.rooms.lock().await;
        prune_finished(&mut rooms);
        let mut rng = rand::thread_rng();
        let code = loop {
            let code = generate_room_code(&mut rng);
            if !rooms.contains_key(&code) {
                break code;
            }
        };
        let host_token = generate_token(&mut rng);

        let (tx, _) = broadcast::channel(self.capacity);
        rooms.insert(
            code.clone(),
            Room {
                host_token: host_token.clone(),
                host_name,
                guests: vec![],
                session: HostSession::new(config, BroadcastChannel { tx }),
            },
        );
        tracing::info!(%code, "room created");
        CreatedRoom { code, host_token }
    }

    /// Guests can only take a seat while the room is still in setup.
    pub async fn join(&self, code: &str, name: String) -> Result<Lobby, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = find(&mut rooms, code)?;
        if room.session.state().phase() != Phase::Setup {
            return Err(GameError::AlreadyStarted.into());
        }
        tracing::info!(%code, guest = %name, "guest joined");
        room.guests.push(name);
        Ok(lobby(code, room))
    }

    pub async fn lobby(&self, code: &str) -> Result<Lobby, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = find(&mut rooms, code)?;
        Ok(lobby(code, room))
    }

    /// Seats the host, then guests in join order, up to the table size.
    pub async fn start(&self, code: &str, token: &str) -> Result<Snapshot, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = authorize(&mut rooms, code, token)?;
        let names: Vec<String> = std::iter::once(room.host_name.clone())
            .chain(room.guests.iter().cloned())
            .take(room.session.state().seats())
            .collect();
        Ok(room.session.apply(&GameEvent::Start { names })?)
    }

    pub async fn apply(
        &self,
        code: &str,
        token: &str,
        event: &GameEvent,
    ) -> Result<Snapshot, RoomError> {
        let mut rooms = self.rooms.lock().await;
        let room = authorize(&mut rooms, code, token)?;
        Ok(room.session.apply(event)?)
    }

    /// Host-only. Dropping the room closes every guest stream.
    pub async fn close(&self, code: &str, token: &str) -> Result<(), RoomError> {
        let mut rooms = self.rooms.lock().await;
        authorize(&mut rooms, code, token)?;
        rooms.remove(code);
        tracing::info!(%code, "room closed");
        Ok(())
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.lock().await.len()
    }

    pub async fn snapshot(&self, code: &str) -> Result<Snapshot, RoomError> {
        let mut rooms = self.rooms.lock().await;
        Ok(find(&mut rooms, code)?.session.state().snapshot())
    }

    /// The current snapshot plus a receiver for every later one. Both are
    /// taken under the same lock so nothing falls between them.
    pub async fn subscribe(
        &self,
        code: &str,
    ) -> Result<(Snapshot, broadcast::Receiver<String>), RoomError> {
        let mut rooms = self.rooms.lock().await;
        let session = &find(&mut rooms, code)?.session;
        Ok((session.state().snapshot(), session.channel().tx.subscribe()))
    }
}

/// Finished games nobody is watching any more.
fn prune_finished(rooms: &mut HashMap<String, Room>) {
    rooms.retain(|code, room| {
        let done = room.session.state().phase() == Phase::Finished
            && room.session.channel().tx.receiver_count() == 0;
        if done {
            tracing::debug!(%code, "finished room dropped");
        }
        !done
    });
}

fn find<'a>(rooms: &'a mut HashMap<String, Room>, code: &str) -> Result<&'a mut Room, RoomError> {
    rooms
        .get_mut(code)
        .ok_or_else(|| RoomError::NotFound(code.to_string()))
}

fn authorize<'a>(
    rooms: &'a mut HashMap<String, Room>,
    code: &str,
    token: &str,
) -> Result<&'a mut Room, RoomError> {
    let room = find(rooms, code)?;
    if room.host_token != token {
        tracing::warn!(%code, "host token mismatch");
        return Err(RoomError::Forbidden);
    }
    Ok(room)
}

fn lobby(code: &str, room: &Room) -> Lobby {
    Lobby {
        code: code.to_string(),
        host: room.host_name.clone(),
        guests: room.guests.clone(),
        snapshot: room.session.state().snapshot(),
    }
}
